//! Error types for the coding core.

use thiserror::Error;

/// Result type for coding operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised when parameters or inputs violate a precondition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Bit depth outside the supported range.
    #[error("invalid bit depth: {bits} (expected 1..={max})", max = crate::quantizer::BitDepth::MAX_BITS)]
    InvalidBitDepth {
        /// The rejected bit depth.
        bits: u32,
    },

    /// Error rate outside [0, 1].
    #[error("invalid error rate: {rate} (expected a value in [0, 1])")]
    InvalidErrorRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Two sequences that must be compared sample by sample differ in length.
    #[error("length mismatch: original has {original} samples, distorted has {distorted}")]
    LengthMismatch {
        /// Length of the reference sequence.
        original: usize,
        /// Length of the distorted sequence.
        distorted: usize,
    },

    /// An operation that needs at least one sample got none.
    #[error("signal is empty")]
    EmptySignal,

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Experiment configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CodecError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::InvalidBitDepth { .. } => "DPCM_001",
            CodecError::InvalidErrorRate { .. } => "DPCM_002",
            CodecError::LengthMismatch { .. } => "DPCM_003",
            CodecError::EmptySignal => "DPCM_004",
            CodecError::InvalidSampleRate { .. } => "DPCM_005",
            CodecError::InvalidParameter { .. } => "DPCM_006",
            CodecError::InvalidConfig(_) => "DPCM_007",
        }
    }
}
