//! Error types for the synthesis backend.

use bitgun_seed::SeedError;
use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur around rendering.
///
/// Rendering itself is total over `[0,1]^4`; these cover seed input and
/// delivery of finished buffers.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Seed input was rejected.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An audio sink refused a buffer.
    #[error("sink error: {message}")]
    Sink {
        /// Error message.
        message: String,
    },
}

impl SynthError {
    /// Creates a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::Seed(inner) => inner.code(),
            SynthError::Io(_) => "SYNTH_001",
            SynthError::Sink { .. } => "SYNTH_002",
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        match self {
            SynthError::Seed(_) => "seed",
            _ => "synth",
        }
    }
}
