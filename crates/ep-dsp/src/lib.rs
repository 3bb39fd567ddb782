//! ep-dsp: Predicted EQ response math for EarProof
//!
//! Pure, deterministic frequency-domain computation. Nothing here touches
//! sample buffers; the crate predicts what a parametric EQ configuration
//! does to the spectrum and derives loudness-matching trim from it.
//!
//! ## Modules
//! - `response` - Biquad coefficients and pointwise magnitude response
//! - `spectrum` - Response curve and peak gain over the shared log grid
//! - `loudness` - Loudness-matching trim between two configurations

pub mod loudness;
pub mod response;
pub mod spectrum;

pub use loudness::{LoudnessModel, PeakGainMatch, auto_trim};
pub use response::{GAIN_FLOOR_DB, SAMPLE_RATE_HZ, magnitude_db};
pub use spectrum::{
    CurvePoint, GRID_MAX_HZ, GRID_MIN_HZ, GRID_POINTS, Spectrum, evaluate, frequency_grid,
    peak_gain_db,
};
