//! Similarity command implementation

use anyhow::Result;
use bitgun_seed::{calculate_seed_similarity, Seed};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::SimilarityOutput;
use super::{fail, print_json, seed_error, EXIT_INVALID_INPUT};

/// Run the similarity command
pub fn run(a: &str, b: &str, json: bool) -> Result<ExitCode> {
    let mut seeds = Vec::with_capacity(2);
    for text in [a, b] {
        match Seed::parse(text) {
            Ok(seed) => seeds.push(seed.to_string()),
            Err(err) => return fail(json, seed_error(&err), EXIT_INVALID_INPUT),
        }
    }
    let (a, b) = (seeds.remove(0), seeds.remove(0));
    let similarity = calculate_seed_similarity(&a, &b);

    if json {
        print_json(&SimilarityOutput {
            success: true,
            a,
            b,
            similarity,
        })?;
    } else {
        let value = format!("{:.4}", similarity);
        let value = if similarity >= 0.9 {
            value.green()
        } else if similarity >= 0.5 {
            value.yellow()
        } else {
            value.red()
        };
        println!("{} {} ~ {}: {}", "Similarity".cyan().bold(), a, b, value);
    }
    Ok(ExitCode::SUCCESS)
}
