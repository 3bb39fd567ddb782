//! Response curve and peak gain over the shared frequency grid

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use ep_core::{EpResult, EqConfig};

use crate::response::magnitude_db;

/// Number of grid points
pub const GRID_POINTS: usize = 200;

/// Lower grid edge in Hz
pub const GRID_MIN_HZ: f64 = 20.0;

/// Upper grid edge in Hz
pub const GRID_MAX_HZ: f64 = 20000.0;

/// Process-wide evaluation grid, logarithmically spaced.
///
/// Every evaluation shares this grid so curves and peak gains from
/// different configurations are directly comparable.
static FREQ_GRID: LazyLock<[f64; GRID_POINTS]> = LazyLock::new(|| {
    let ratio = GRID_MAX_HZ / GRID_MIN_HZ;
    std::array::from_fn(|i| {
        let t = i as f64 / (GRID_POINTS - 1) as f64;
        GRID_MIN_HZ * ratio.powf(t)
    })
});

/// The shared logarithmic frequency grid
pub fn frequency_grid() -> &'static [f64] {
    &*FREQ_GRID
}

/// One point of a predicted response curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// Predicted response of a configuration over the shared grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Per-frequency combined magnitude, in grid order
    pub points: Vec<CurvePoint>,

    /// Worst-case gain: maximum combined magnitude across the grid.
    ///
    /// Taken over the summed response, not per-band peaks, since
    /// overlapping bands add constructively.
    pub peak_gain_db: f64,
}

/// Evaluate a configuration over the shared grid.
///
/// Sums the preamp and every *enabled* band's magnitude response at each
/// grid frequency. Deterministic: the same configuration always yields
/// bit-identical output. Rejects invalid configurations before evaluating.
pub fn evaluate(config: &EqConfig) -> EpResult<Spectrum> {
    config.validate()?;

    let mut points = Vec::with_capacity(GRID_POINTS);
    let mut peak_gain_db = f64::NEG_INFINITY;

    for &freq in frequency_grid() {
        let mut sum = config.preamp_db;
        for band in config.bands.iter().filter(|b| b.enabled) {
            sum += magnitude_db(freq, band);
        }
        if sum > peak_gain_db {
            peak_gain_db = sum;
        }
        points.push(CurvePoint {
            frequency_hz: freq,
            magnitude_db: sum,
        });
    }

    Ok(Spectrum {
        points,
        peak_gain_db,
    })
}

/// Worst-case gain of a configuration across the grid
pub fn peak_gain_db(config: &EqConfig) -> EpResult<f64> {
    Ok(evaluate(config)?.peak_gain_db)
}
