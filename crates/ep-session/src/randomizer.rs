//! Balanced per-trial hidden-mapping generation
//!
//! A single global coin flip would let one lucky identification decide the
//! whole session, and fully independent flips can drift far from 50/50 on
//! short sessions. Instead the full session's mappings are built as a
//! balanced multiset and shuffled once: each trial is unpredictable from
//! the listener's seat while the overall split deviates by at most one
//! trial.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::session::TestMode;

/// Hidden assignment for one trial, fixed before the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrialPlan {
    /// true = playback slot 1 carries configuration A
    pub slot_one_is_a: bool,

    /// ABX only: true = the hidden reference X carries configuration A.
    /// Drawn independently per trial.
    pub x_is_a: Option<bool>,
}

/// Generate the full session's trial plans.
///
/// The slot mapping is a shuffled balanced multiset (odd totals get one
/// extra coin flip). The ABX reference side is an independent draw per
/// trial.
pub fn generate_plan<R: Rng + ?Sized>(
    mode: TestMode,
    total_trials: usize,
    rng: &mut R,
) -> Vec<TrialPlan> {
    let half = total_trials / 2;
    let mut mappings: Vec<bool> = Vec::with_capacity(total_trials);
    mappings.extend(std::iter::repeat_n(true, half));
    mappings.extend(std::iter::repeat_n(false, half));
    if total_trials % 2 == 1 {
        mappings.push(rng.random());
    }
    mappings.shuffle(rng);

    mappings
        .into_iter()
        .map(|slot_one_is_a| TrialPlan {
            slot_one_is_a,
            x_is_a: match mode {
                TestMode::Abx => Some(rng.random()),
                TestMode::Ab | TestMode::BlindAb => None,
            },
        })
        .collect()
}

/// Fraction of trials whose slot 1 carries A
pub fn mapping_balance(plans: &[TrialPlan]) -> f64 {
    if plans.is_empty() {
        return 0.5;
    }
    let ones = plans.iter().filter(|p| p.slot_one_is_a).count();
    ones as f64 / plans.len() as f64
}
