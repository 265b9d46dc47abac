//! CLI configuration file.
//!
//! ```json
//! {
//!   "seed": { "curve": "smooth", "strength": 1.0, "noise_bias": 0.1 },
//!   "engine": { "noise": "seeded", "cache": { "capacity": 50, "policy": "lru" } },
//!   "output_dir": "sfx"
//! }
//! ```
//!
//! Every section is optional. Command-line flags override file values.

use anyhow::{Context, Result};
use bitgun_seed::SeedOptions;
use bitgun_synth::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Options for deriving parameters from seeds.
    pub seed: SeedOptions,
    /// Engine settings.
    pub engine: EngineConfig,
    /// Directory for exported WAV files.
    pub output_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse config JSON")
    }

    /// Loads the file at `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("Invalid config file: {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}
