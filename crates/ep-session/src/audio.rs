//! Audio-apply collaborator boundary
//!
//! The session never touches audio itself; it pushes resolved
//! configurations toward whatever engine actually renders sound. Failures
//! surface to the caller, the core never retries on its own.

use ep_core::{EpResult, EqConfig};

/// External audio-apply collaborator.
///
/// `apply` pushes one resolved configuration (bands + preamp) plus the trim
/// to bake into it. Calls may arrive rapidly while the listener scrubs
/// between options; last call wins.
pub trait AudioSink: Send {
    fn apply(&self, config: &EqConfig, applied_trim_db: f64) -> EpResult<()>;
}

/// Sink that accepts everything and does nothing. For tests and dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn apply(&self, _config: &EqConfig, _applied_trim_db: f64) -> EpResult<()> {
        Ok(())
    }
}
