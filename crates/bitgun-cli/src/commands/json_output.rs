//! JSON output types for the `--json` flag.
//!
//! Every command prints one JSON object with a `success` flag. Failures carry
//! `errors`, each with a stable code: `CLI_xxx` for CLI-level problems, or the
//! `SEED_xxx`/`SYNTH_xxx` code of the library error.

use bitgun_seed::{ParameterVector, TraitSelectors};
use bitgun_synth::NoiseMode;
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
pub mod error_codes {
    /// Unknown curve name on the command line
    pub const UNKNOWN_CURVE: &str = "CLI_001";
    /// Unknown distribution name on the command line
    pub const UNKNOWN_DISTRIBUTION: &str = "CLI_002";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    pub code: String,
    pub message: String,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Output of a command that failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
}

/// Output of `generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub seed: String,
    pub weapon: String,
    pub params: ParameterVector,
    pub traits: TraitSelectors,
    /// Noise source the render used
    pub noise: NoiseMode,
    pub samples: usize,
    pub duration_seconds: f64,
    /// BLAKE3 of the 16-bit PCM data
    pub pcm_hash: String,
    pub path: String,
}

/// Output of `inspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub success: bool,
    pub seed: String,
    pub weapon: String,
    pub traits: TraitSelectors,
    pub params: ParameterVector,
}

/// One related seed in `mutate` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedSeed {
    pub seed: String,
    pub similarity: f64,
}

/// Output of `mutate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutateOutput {
    pub success: bool,
    pub seed: String,
    pub distribution: String,
    pub amount: f64,
    pub related: Vec<RelatedSeed>,
}

/// Output of `sequence`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceOutput {
    pub success: bool,
    pub step_size: f64,
    pub seeds: Vec<String>,
}

/// Output of `similarity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityOutput {
    pub success: bool,
    pub a: String,
    pub b: String,
    pub similarity: f64,
}

/// Output of `compose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeOutput {
    pub success: bool,
    pub seed: String,
    pub traits: TraitSelectors,
}

/// Output of `waveform`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformOutput {
    pub success: bool,
    pub seed: String,
    pub points: usize,
    pub values: Vec<f64>,
}
