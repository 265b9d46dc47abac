//! Error types for seed parsing and codec configuration.

use thiserror::Error;

/// Result type for seed operations.
pub type SeedResult<T> = Result<T, SeedError>;

/// Errors raised by the seed codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedError {
    /// Seed text is not 1-8 hexadecimal characters.
    #[error("invalid seed '{seed}': expected 1-8 hexadecimal characters")]
    InvalidSeed {
        /// The rejected input.
        seed: String,
    },

    /// Curve name is not one of the known response curves.
    #[error("unknown curve '{name}' (expected linear, exp, log, sin, cos, smooth, smoother, binary, or steps)")]
    UnknownCurve {
        /// The rejected name.
        name: String,
    },

    /// Distribution name is not one of the known variation distributions.
    #[error("unknown distribution '{name}' (expected uniform, normal, or biased)")]
    UnknownDistribution {
        /// The rejected name.
        name: String,
    },

    /// A trait selector was outside 0..=3 where strict parsing was requested.
    #[error("selector '{name}' out of range: {value} (expected 0-3)")]
    SelectorOutOfRange {
        /// Selector field name.
        name: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// The random source could not produce bytes.
    #[error("random source failed: {message}")]
    Entropy {
        /// Error message from the source.
        message: String,
    },
}

impl SeedError {
    /// Creates an invalid seed error.
    pub fn invalid_seed(seed: impl Into<String>) -> Self {
        Self::InvalidSeed { seed: seed.into() }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            SeedError::InvalidSeed { .. } => "SEED_001",
            SeedError::UnknownCurve { .. } => "SEED_002",
            SeedError::UnknownDistribution { .. } => "SEED_003",
            SeedError::SelectorOutOfRange { .. } => "SEED_004",
            SeedError::Entropy { .. } => "SEED_005",
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        "seed"
    }
}
