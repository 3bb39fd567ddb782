//! Hypothesis tests and verdicts for finished sessions
//!
//! Everything here recomputes from the full answer log on every call;
//! there is no running tally that could drift from the authoritative
//! record. Exact small-sample methods throughout: two-tailed exact
//! binomial for ABX identification, chi-square goodness-of-fit for
//! preference splits, Wilson score interval instead of the normal
//! approximation.

use serde::{Deserialize, Serialize};

use ep_core::{EpError, EpResult};

use crate::session::{Answer, OptionLabel, Session, TestMode};

const P_EXTREMELY_SIGNIFICANT: f64 = 0.001;
const P_HIGHLY_SIGNIFICANT: f64 = 0.01;
const P_SIGNIFICANT: f64 = 0.05;

/// z for a 95% Wilson score interval
const WILSON_Z_95: f64 = 1.959963984540054;

/// Statistics over one finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistics {
    /// AB/BlindAB: trials where the listener preferred A (un-blinded)
    pub preference_a: usize,
    /// AB/BlindAB: trials where the listener preferred B
    pub preference_b: usize,
    /// ABX: correct identifications
    pub correct: usize,
    /// ABX: incorrect identifications
    pub incorrect: usize,
    /// Two-tailed p-value against the 50/50 null
    pub p_value: f64,
    /// 95% Wilson score interval on the tested proportion
    pub ci_low: f64,
    pub ci_high: f64,
    pub verdict: String,
}

/// Summarize a session from its answer log.
pub fn summarize(session: &Session) -> EpResult<SessionStatistics> {
    let answers: Vec<Answer> = session.answers().cloned().collect();
    summarize_answers(session.mode(), &answers)
}

/// Summarize a raw answer log.
///
/// An empty log is an error: reporting zeros would look like a real
/// result.
pub fn summarize_answers(mode: TestMode, answers: &[Answer]) -> EpResult<SessionStatistics> {
    if answers.is_empty() {
        return Err(EpError::Stats("no recorded answers to summarize".into()));
    }

    match mode {
        TestMode::Abx => summarize_identification(answers),
        TestMode::Ab | TestMode::BlindAb => summarize_preference(mode, answers),
    }
}

fn summarize_identification(answers: &[Answer]) -> EpResult<SessionStatistics> {
    let correct = answers
        .iter()
        .filter(|a| a.correct == Some(true))
        .count();
    let incorrect = answers
        .iter()
        .filter(|a| a.correct == Some(false))
        .count();
    let n = correct + incorrect;
    if n == 0 {
        return Err(EpError::Stats(
            "no graded answers in identification log".into(),
        ));
    }

    let p_value = binomial_two_sided_p(correct, n);
    let (ci_low, ci_high) = wilson_interval(correct, n);

    Ok(SessionStatistics {
        preference_a: 0,
        preference_b: 0,
        correct,
        incorrect,
        p_value,
        ci_low,
        ci_high,
        verdict: verdict_for(p_value),
    })
}

fn summarize_preference(mode: TestMode, answers: &[Answer]) -> EpResult<SessionStatistics> {
    let mut preference_a = 0;
    let mut preference_b = 0;
    for answer in answers {
        let preferred_a = match mode {
            TestMode::Ab => answer.choice == OptionLabel::A,
            // Un-blind: slot 1 was A exactly when the mapping says so.
            TestMode::BlindAb => (answer.choice == OptionLabel::Slot1) == answer.slot_one_is_a,
            TestMode::Abx => unreachable!("preference summary never sees ABX answers"),
        };
        if preferred_a {
            preference_a += 1;
        } else {
            preference_b += 1;
        }
    }

    let n = preference_a + preference_b;
    let p_value = chi_square_5050_p(preference_a, n);
    let (ci_low, ci_high) = wilson_interval(preference_a, n);

    Ok(SessionStatistics {
        preference_a,
        preference_b,
        correct: 0,
        incorrect: 0,
        p_value,
        ci_low,
        ci_high,
        verdict: verdict_for(p_value),
    })
}

fn verdict_for(p_value: f64) -> String {
    if p_value < P_EXTREMELY_SIGNIFICANT {
        "Extremely significant (p < 0.001)".to_string()
    } else if p_value < P_HIGHLY_SIGNIFICANT {
        "Highly significant (p < 0.01)".to_string()
    } else if p_value < P_SIGNIFICANT {
        "Significant (p < 0.05)".to_string()
    } else {
        "Not significant (p >= 0.05)".to_string()
    }
}

/// C(n, k) via the multiplicative formula, symmetric in k
fn binomial_coefficient(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0_f64;
    for i in 1..=k {
        c *= (n - k + i) as f64 / i as f64;
    }
    c
}

/// Two-tailed exact binomial test against p = 0.5.
///
/// The null is symmetric, so the smaller tail doubled (capped at 1) is
/// the exact two-tailed mass.
fn binomial_two_sided_p(k: usize, n: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let tail_k = k.min(n - k);
    let per_outcome = 0.5_f64.powi(n as i32);
    let mut tail = 0.0;
    for i in 0..=tail_k {
        tail += binomial_coefficient(n, i) * per_outcome;
    }
    (2.0 * tail).min(1.0)
}

/// Chi-square goodness-of-fit against a 50/50 split, df = 1.
fn chi_square_5050_p(count_a: usize, n: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let expected = n as f64 / 2.0;
    let da = count_a as f64 - expected;
    let db = (n - count_a) as f64 - expected;
    let chi_square = (da * da + db * db) / expected;
    // Survival function for df = 1.
    erfc((chi_square / 2.0).sqrt())
}

/// Complementary error function, Abramowitz & Stegun 7.1.26.
/// |error| < 1.5e-7 — far finer than any verdict threshold here.
fn erfc(x: f64) -> f64 {
    let x_abs = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x_abs);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let value = poly * (-x_abs * x_abs).exp();
    if x < 0.0 { 2.0 - value } else { value }
}

/// 95% Wilson score interval on successes/n.
fn wilson_interval(successes: usize, n: usize) -> (f64, f64) {
    if n == 0 {
        return (0.0, 1.0);
    }
    let n_f = n as f64;
    let p_hat = successes as f64 / n_f;
    let z = WILSON_Z_95;
    let z_sq = z * z;
    let denom = 1.0 + z_sq / n_f;
    let center = (p_hat + z_sq / (2.0 * n_f)) / denom;
    let half = (z / denom) * (p_hat * (1.0 - p_hat) / n_f + z_sq / (4.0 * n_f * n_f)).sqrt();
    ((center - half).max(0.0), (center + half).min(1.0))
}
