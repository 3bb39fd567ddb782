//! Full EQ configuration type

use serde::{Deserialize, Serialize};

use crate::{EpError, EpResult, EqBand};

/// A complete EQ curve: global preamp plus an ordered list of bands.
///
/// The name identifies the configuration for display and for the blind
/// reveal at session end; it plays no part in response computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqConfig {
    pub name: String,

    /// Global gain in dB applied before all filters.
    #[serde(default)]
    pub preamp_db: f64,

    pub bands: Vec<EqBand>,
}

impl EqConfig {
    pub fn new(name: impl Into<String>, preamp_db: f64, bands: Vec<EqBand>) -> Self {
        Self {
            name: name.into(),
            preamp_db,
            bands,
        }
    }

    /// A named flat configuration (no bands, 0 dB preamp).
    pub fn flat(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, Vec::new())
    }

    /// Validate preamp and every band before evaluation.
    pub fn validate(&self) -> EpResult<()> {
        if !self.preamp_db.is_finite() {
            return Err(EpError::InvalidParam(format!(
                "preamp must be finite, got {}",
                self.preamp_db
            )));
        }
        for band in &self.bands {
            band.validate()?;
        }
        Ok(())
    }

    /// True if both configurations describe the same response curve.
    ///
    /// Compares preamp and band parameters, ignoring names: two differently
    /// named copies of the same curve are indistinguishable by ear and make
    /// no sense as a listening-test pair.
    pub fn same_curve(&self, other: &EqConfig) -> bool {
        self.preamp_db == other.preamp_db && self.bands == other.bands
    }
}
