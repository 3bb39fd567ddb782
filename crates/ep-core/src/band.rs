//! Parametric filter band types

use serde::{Deserialize, Serialize};

use crate::{EpError, EpResult};

/// Lowest valid band frequency in Hz
pub const MIN_BAND_FREQ_HZ: f64 = 20.0;

/// Highest valid band frequency in Hz
pub const MAX_BAND_FREQ_HZ: f64 = 20000.0;

/// Filter shapes supported by the response model.
///
/// Serializes to lowercase strings (`"peaking"`, `"lowshelf"`, `"highshelf"`)
/// for frontend compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterShape {
    /// Bell filter centered on the frequency. Q controls bandwidth.
    Peaking,
    /// Shelf affecting frequencies below the cutoff. Q controls slope.
    LowShelf,
    /// Shelf affecting frequencies above the cutoff. Q controls slope.
    HighShelf,
}

/// A single parametric EQ band.
///
/// Immutable value type; a configuration owns its bands by position.
/// Gain is intentionally unbounded (±15 dB is typical use), frequency and Q
/// are range-checked by [`EqBand::validate`] before any evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqBand {
    pub shape: FilterShape,

    /// Center frequency (peaking) or cutoff frequency (shelves) in Hz.
    pub frequency: f64,

    /// Boost or cut in dB. Positive boosts, negative cuts.
    pub gain_db: f64,

    /// Q factor controlling bandwidth (peaking) or slope (shelves). Must be > 0.
    pub q: f64,

    /// Disabled bands contribute nothing to the response.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl EqBand {
    pub fn new(shape: FilterShape, frequency: f64, gain_db: f64, q: f64) -> Self {
        Self {
            shape,
            frequency,
            gain_db,
            q,
            enabled: true,
        }
    }

    /// Reject out-of-range parameters at the API boundary.
    ///
    /// The response model additionally clamps frequencies as a numerical
    /// guard, but invalid input is an error here, not something to clamp
    /// silently.
    pub fn validate(&self) -> EpResult<()> {
        if !self.frequency.is_finite()
            || self.frequency < MIN_BAND_FREQ_HZ
            || self.frequency > MAX_BAND_FREQ_HZ
        {
            return Err(EpError::InvalidParam(format!(
                "band frequency {} Hz outside {}..{} Hz",
                self.frequency, MIN_BAND_FREQ_HZ, MAX_BAND_FREQ_HZ
            )));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(EpError::InvalidParam(format!(
                "band Q must be positive, got {}",
                self.q
            )));
        }
        if !self.gain_db.is_finite() {
            return Err(EpError::InvalidParam(format!(
                "band gain must be finite, got {}",
                self.gain_db
            )));
        }
        Ok(())
    }
}
