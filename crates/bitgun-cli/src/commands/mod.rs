//! CLI command implementations
//!
//! Every command returns `Result<ExitCode>`. Invalid input is reported and
//! mapped to [`EXIT_INVALID_INPUT`]; render or export failure to
//! [`EXIT_RENDER_FAILURE`]. An `Err` is an unexpected failure and `main`
//! reports it.

pub mod compose;
pub mod generate;
pub mod inspect;
pub mod json_output;
pub mod mutate;
pub mod sequence;
pub mod similarity;
pub mod waveform;

use anyhow::{Context, Result};
use bitgun_seed::{Curve, SeedError, SeedOptions};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use json_output::{error_codes, FailureOutput, JsonError};

/// Exit code for rejected input.
pub const EXIT_INVALID_INPUT: u8 = 1;
/// Exit code for render or export failure.
pub const EXIT_RENDER_FAILURE: u8 = 2;

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("{}: failed to serialize output", error_codes::JSON_SERIALIZE))?;
    println!("{}", json);
    Ok(())
}

/// Reports a failure and returns `exit` as the exit code.
pub(crate) fn fail(json: bool, error: JsonError, exit: u8) -> Result<ExitCode> {
    if json {
        print_json(&FailureOutput {
            success: false,
            errors: vec![error],
        })?;
    } else {
        eprintln!("{} [{}] {}", "error".red().bold(), error.code, error.message);
    }
    Ok(ExitCode::from(exit))
}

/// Converts a seed error into a JSON error.
pub(crate) fn seed_error(err: &SeedError) -> JsonError {
    JsonError::new(err.code(), err.to_string())
}

/// Applies an optional `--curve` flag to seed options.
pub(crate) fn with_curve(
    mut options: SeedOptions,
    curve: Option<&str>,
) -> std::result::Result<SeedOptions, JsonError> {
    if let Some(name) = curve {
        options.curve = name
            .parse::<Curve>()
            .map_err(|err| JsonError::new(error_codes::UNKNOWN_CURVE, err.to_string()))?;
    }
    Ok(options)
}

/// Prints a labelled line of human output.
pub(crate) fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{}:", label).dimmed(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_curve() {
        let options = with_curve(SeedOptions::default(), Some("SMOOTH")).unwrap();
        assert_eq!(options.curve, Curve::Smooth);
        let err = with_curve(SeedOptions::default(), Some("wobbly")).unwrap_err();
        assert_eq!(err.code, error_codes::UNKNOWN_CURVE);
        assert_eq!(with_curve(SeedOptions::default(), None).unwrap(), SeedOptions::default());
    }

    #[test]
    fn test_seed_error_keeps_code() {
        let err = seed_error(&SeedError::invalid_seed("XYZ"));
        assert_eq!(err.code, "SEED_001");
        assert!(err.message.contains("XYZ"));
    }
}
