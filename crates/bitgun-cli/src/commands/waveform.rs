//! Waveform command implementation

use anyhow::Result;
use bitgun_seed::SeedOptions;
use bitgun_synth::{summarize, SfxEngine, SynthError};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::{JsonError, WaveformOutput};
use super::{fail, print_json, seed_error, EXIT_INVALID_INPUT, EXIT_RENDER_FAILURE};

const BAR_WIDTH: usize = 40;

/// Run the waveform command
///
/// Human output prints one bar per point; JSON output has the raw values.
pub fn run(seed: &str, points: usize, json: bool) -> Result<ExitCode> {
    let mut engine = SfxEngine::default();
    let rendered = match engine.render_seed(seed, &SeedOptions::default()) {
        Ok(rendered) => rendered,
        Err(SynthError::Seed(err)) => return fail(json, seed_error(&err), EXIT_INVALID_INPUT),
        Err(err) => return fail(json, JsonError::new(err.code(), err.to_string()), EXIT_RENDER_FAILURE),
    };
    let values = summarize(&rendered.buffer, points);

    if json {
        print_json(&WaveformOutput {
            success: true,
            seed: rendered.seed.to_string(),
            points,
            values,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Waveform".cyan().bold(), rendered.seed.to_string().bold());
    let peak = values.iter().cloned().fold(0.0f64, f64::max);
    for value in &values {
        let width = if peak > 0.0 {
            ((value / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!("  {:.4} {}", value, "#".repeat(width).green());
    }
    Ok(ExitCode::SUCCESS)
}
