//! Sequence command implementation

use anyhow::Result;
use bitgun_seed::{calculate_seed_similarity, Seed, SeedSequence};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::SequenceOutput;
use super::{fail, print_json, seed_error, EXIT_INVALID_INPUT};
use crate::rng::CliRng;

/// Run the sequence command
///
/// # Arguments
/// * `seed` - Starting seed; yielded first
/// * `steps` - Number of seeds (at least one)
/// * `step_size` - Change per step
/// * `rng_seed` - Optional seed for a reproducible walk
/// * `json` - Whether to output machine-readable JSON
pub fn run(
    seed: &str,
    steps: usize,
    step_size: f64,
    rng_seed: Option<u64>,
    json: bool,
) -> Result<ExitCode> {
    let start = match Seed::parse(seed) {
        Ok(seed) => seed.to_string(),
        Err(err) => return fail(json, seed_error(&err), EXIT_INVALID_INPUT),
    };

    let sequence = SeedSequence::new(&start, steps, step_size);
    let mut rng = CliRng::new(rng_seed);
    let seeds: Vec<String> = sequence.walk(&mut rng).collect();

    if json {
        print_json(&SequenceOutput {
            success: true,
            step_size,
            seeds,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {} steps", "Sequence".cyan().bold(), seeds.len());
    for (i, s) in seeds.iter().enumerate() {
        let similarity = calculate_seed_similarity(&start, s);
        println!("  {:>3}  {}  {}", i, s, format!("{:.3}", similarity).dimmed());
    }
    Ok(ExitCode::SUCCESS)
}
