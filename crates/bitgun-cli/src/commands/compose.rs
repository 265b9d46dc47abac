//! Compose command implementation
//!
//! Missing selectors and the two parameter-only bytes are drawn from the
//! random source.

use anyhow::Result;
use bitgun_seed::{create_seed_with_features, extract_features, FeatureRequest};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::ComposeOutput;
use super::{field, print_json};
use crate::rng::CliRng;

/// Builds a request from the byte-0 and byte-1 selector flags, in packing order.
pub fn request(byte0: [Option<u8>; 4], byte1: [Option<u8>; 4]) -> FeatureRequest {
    let [weapon_type, envelope_type, oscillator_type, modulation_type] = byte0;
    let [effect_type, pitch_bend_type, repeat_type, harmonics_type] = byte1;
    FeatureRequest {
        weapon_type,
        envelope_type,
        oscillator_type,
        modulation_type,
        effect_type,
        pitch_bend_type,
        repeat_type,
        harmonics_type,
    }
}

/// Run the compose command
pub fn run(request: &FeatureRequest, rng_seed: Option<u64>, json: bool) -> Result<ExitCode> {
    let seed = create_seed_with_features(request, &mut CliRng::new(rng_seed));
    let traits = extract_features(&seed).traits;

    if json {
        print_json(&ComposeOutput {
            success: true,
            seed,
            traits,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Composed".green().bold(), seed.bold());
    field("weapon", traits.weapon());
    field("selectors", format!("{:?}", traits.to_array()));
    Ok(ExitCode::SUCCESS)
}
