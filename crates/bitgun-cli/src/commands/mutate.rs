//! Mutate command implementation
//!
//! Related seeds are drawn around the input's linear parameter vector.

use anyhow::Result;
use bitgun_seed::{
    calculate_seed_similarity, get_random_variation, parameters_to_seed, seed_to_numbers,
    Distribution, Seed, SeedOptions, VariationOptions,
};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::{error_codes, JsonError, MutateOutput, RelatedSeed};
use super::{fail, print_json, seed_error, EXIT_INVALID_INPUT};
use crate::rng::CliRng;

/// Flags of the mutate command.
#[derive(Debug, Clone)]
pub struct MutateOptions<'a> {
    pub seed: &'a str,
    pub amount: f64,
    pub distribution: &'a str,
    pub count: usize,
    pub rng_seed: Option<u64>,
    pub json: bool,
}

/// Run the mutate command
pub fn run(opts: &MutateOptions<'_>) -> Result<ExitCode> {
    let json = opts.json;
    let seed = match Seed::parse(opts.seed) {
        Ok(seed) => seed.to_string(),
        Err(err) => return fail(json, seed_error(&err), EXIT_INVALID_INPUT),
    };
    let distribution = match opts.distribution.parse::<Distribution>() {
        Ok(d) => d,
        Err(err) => {
            let error = JsonError::new(error_codes::UNKNOWN_DISTRIBUTION, err.to_string());
            return fail(json, error, EXIT_INVALID_INPUT);
        }
    };

    let base = seed_to_numbers(&seed, &SeedOptions::default());
    let variation = VariationOptions::with_distribution(distribution);
    let mut rng = CliRng::new(opts.rng_seed);
    let related: Vec<RelatedSeed> = (0..opts.count)
        .map(|_| {
            let varied = get_random_variation(&base, opts.amount, &variation, &mut rng);
            let related = parameters_to_seed(&varied);
            RelatedSeed {
                similarity: calculate_seed_similarity(&seed, &related),
                seed: related,
            }
        })
        .collect();

    let output = MutateOutput {
        success: true,
        seed,
        distribution: distribution.to_string(),
        amount: opts.amount,
        related,
    };

    if json {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} ({} ±{})",
        "Related to".cyan().bold(),
        output.seed.bold(),
        output.distribution,
        output.amount
    );
    for r in &output.related {
        println!("  {}  {:.3}", r.seed, r.similarity);
    }
    Ok(ExitCode::SUCCESS)
}
