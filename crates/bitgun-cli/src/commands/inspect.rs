//! Inspect command implementation

use anyhow::Result;
use bitgun_seed::{extract_features_with, Seed, SeedOptions};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::InspectOutput;
use super::{fail, field, print_json, seed_error, with_curve, EXIT_INVALID_INPUT};

/// Run the inspect command
///
/// # Arguments
/// * `seed` - Seed text, 1-8 hex digits
/// * `curve` - Optional response curve name
/// * `json` - Whether to output machine-readable JSON
pub fn run(seed: &str, curve: Option<&str>, json: bool) -> Result<ExitCode> {
    let seed = match Seed::parse(seed) {
        Ok(seed) => seed,
        Err(err) => return fail(json, seed_error(&err), EXIT_INVALID_INPUT),
    };
    let options = match with_curve(SeedOptions::default(), curve) {
        Ok(options) => options,
        Err(err) => return fail(json, err, EXIT_INVALID_INPUT),
    };

    let features = extract_features_with(&seed.to_string(), &options);
    let output = InspectOutput {
        success: true,
        seed: seed.to_string(),
        weapon: features.traits.weapon().to_string(),
        traits: features.traits,
        params: features.params,
    };

    if json {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    let t = &output.traits;
    println!("{} {}", "Seed".cyan().bold(), output.seed.bold());
    field("weapon", format!("{} ({})", output.weapon, t.weapon_type));
    field("envelope", t.envelope_type);
    field("oscillator", t.oscillator_type);
    field("modulation", t.modulation_type);
    field("effect", t.effect_type);
    field("pitch bend", t.pitch_bend_type);
    field("repeat", t.repeat_type);
    field("harmonics", t.harmonics_type);
    let p = &output.params;
    field("frequency", format!("{:.4}", p.frequency));
    field("decay", format!("{:.4}", p.decay));
    field("noise", format!("{:.4}", p.noise));
    field("crush", format!("{:.4}", p.crush));
    Ok(ExitCode::SUCCESS)
}
