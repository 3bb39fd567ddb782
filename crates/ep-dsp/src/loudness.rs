//! Loudness-matching trim between two configurations

use ep_core::{EpResult, EqConfig};

use crate::spectrum::peak_gain_db;

/// Strategy for estimating the trim that loudness-matches two
/// configurations.
///
/// The trim is the dB adjustment to apply to the candidate so it plays as
/// loud as the reference. Implementations must be pure; the session decides
/// when (and whether) to recompute.
pub trait LoudnessModel {
    fn trim_db(&self, reference: &EqConfig, candidate: &EqConfig) -> EpResult<f64>;
}

/// Worst-case peak-gain matching.
///
/// Returns `peak(reference) - peak(candidate)`: if the candidate's predicted
/// peak is hotter, the trim comes out negative and pulls it down. This is a
/// heuristic stand-in for perceived loudness — it matches the loudest
/// predicted frequency, with no loudness-contour weighting. Known
/// limitation, kept as the contractual baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakGainMatch;

impl LoudnessModel for PeakGainMatch {
    fn trim_db(&self, reference: &EqConfig, candidate: &EqConfig) -> EpResult<f64> {
        Ok(peak_gain_db(reference)? - peak_gain_db(candidate)?)
    }
}

/// Trim for the candidate using the default peak-matching model
pub fn auto_trim(reference: &EqConfig, candidate: &EqConfig) -> EpResult<f64> {
    PeakGainMatch.trim_db(reference, candidate)
}
