//! Error types for EarProof

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum EpError {
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Invalid session operation: {0}")]
    InvalidSession(String),

    #[error("Audio apply failed: {0}")]
    AudioApply(String),

    #[error("Statistics error: {0}")]
    Stats(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type EpResult<T> = Result<T, EpError>;
