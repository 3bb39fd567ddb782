//! Pointwise filter magnitude response
//!
//! Biquad coefficients follow the standard audio-EQ cookbook formulas.
//! Shelving filters convert Q to a slope parameter before computing alpha,
//! matching the behavior of the parametric EQ engines this core predicts
//! responses for.

use std::f64::consts::PI;

use ep_core::{EqBand, FilterShape};

/// Nominal sample rate for response prediction
pub const SAMPLE_RATE_HZ: f64 = 48000.0;

/// Saturation floor for degenerate evaluations, in dB.
///
/// A non-positive or non-finite squared magnitude means the parameters were
/// numerically degenerate; the response saturates to this floor instead of
/// propagating NaN/Infinity. Deliberate policy, not data loss.
pub const GAIN_FLOOR_DB: f64 = -100.0;

/// Margin kept from DC and Nyquist when clamping frequencies, in Hz
const EDGE_MARGIN_HZ: f64 = 1.0;

/// Floor applied to Q in the slope conversion to avoid division by zero
const SLOPE_Q_FLOOR: f64 = 1e-4;

/// Normalized biquad coefficients (a0 divided out)
#[derive(Debug, Clone, Copy)]
struct BiquadCoeffs {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl BiquadCoeffs {
    /// Peaking EQ coefficients
    fn peaking(freq: f64, q: f64, gain_db: f64, sample_rate: f64) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = 1.0 + alpha * a;
        let b1 = -2.0 * cos_omega;
        let b2 = 1.0 - alpha * a;
        let a0 = 1.0 + alpha / a;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha / a;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Shelf alpha from the Q-derived slope parameter S = 1/(2Q²)
    fn shelf_alpha(sin_omega: f64, q: f64, a: f64) -> f64 {
        let q = q.max(SLOPE_Q_FLOOR);
        let s = 1.0 / (2.0 * q * q);
        (sin_omega / 2.0) * ((a + 1.0 / a) * (1.0 / s - 1.0) + 2.0).sqrt()
    }

    /// Low shelf coefficients
    fn low_shelf(freq: f64, q: f64, gain_db: f64, sample_rate: f64) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = Self::shelf_alpha(sin_omega, q, a);
        let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;

        let b0 = a * ((a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha);
        let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega);
        let b2 = a * ((a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha);
        let a0 = (a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha;
        let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega);
        let a2 = (a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// High shelf coefficients
    fn high_shelf(freq: f64, q: f64, gain_db: f64, sample_rate: f64) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = Self::shelf_alpha(sin_omega, q, a);
        let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;

        let b0 = a * ((a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha);
        let b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega);
        let b2 = a * ((a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha);
        let a0 = (a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha;
        let a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos_omega);
        let a2 = (a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    fn for_band(band: &EqBand, center_freq: f64) -> Self {
        match band.shape {
            FilterShape::Peaking => {
                Self::peaking(center_freq, band.q, band.gain_db, SAMPLE_RATE_HZ)
            }
            FilterShape::LowShelf => {
                Self::low_shelf(center_freq, band.q, band.gain_db, SAMPLE_RATE_HZ)
            }
            FilterShape::HighShelf => {
                Self::high_shelf(center_freq, band.q, band.gain_db, SAMPLE_RATE_HZ)
            }
        }
    }

    /// Squared magnitude of H(e^jw) at the given angular frequency.
    ///
    /// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2), evaluated
    /// at z = e^jw via real/imaginary parts, with cos 2w = 2 cos²w - 1.
    fn magnitude_squared(&self, omega: f64) -> f64 {
        let cos_w = omega.cos();
        let sin_w = omega.sin();
        let cos_2w = 2.0 * cos_w * cos_w - 1.0;
        let sin_2w = 2.0 * cos_w * sin_w;

        let num_re = self.b0 + self.b1 * cos_w + self.b2 * cos_2w;
        let num_im = -(self.b1 * sin_w + self.b2 * sin_2w);
        let den_re = 1.0 + self.a1 * cos_w + self.a2 * cos_2w;
        let den_im = -(self.a1 * sin_w + self.a2 * sin_2w);

        let num = num_re * num_re + num_im * num_im;
        let den = den_re * den_re + den_im * den_im;
        num / den
    }
}

/// Keep a frequency away from DC and Nyquist, where the trigonometric
/// identities above degenerate.
fn clamp_to_band(freq_hz: f64) -> f64 {
    freq_hz.clamp(EDGE_MARGIN_HZ, SAMPLE_RATE_HZ / 2.0 - EDGE_MARGIN_HZ)
}

/// Magnitude response of a single band at a frequency, in dB.
///
/// Pure and deterministic. The caller is responsible for range-checking the
/// band (`EqBand::validate`); clamping here is a numerical guard only.
pub fn magnitude_db(frequency_hz: f64, band: &EqBand) -> f64 {
    let eval_freq = clamp_to_band(frequency_hz);
    let center_freq = clamp_to_band(band.frequency);

    let coeffs = BiquadCoeffs::for_band(band, center_freq);
    let omega = 2.0 * PI * eval_freq / SAMPLE_RATE_HZ;
    let mag_sq = coeffs.magnitude_squared(omega);

    if !mag_sq.is_finite() || mag_sq <= 0.0 {
        return GAIN_FLOOR_DB;
    }
    10.0 * mag_sq.log10()
}
