//! Bitgun CLI - render and explore procedural weapon sound effects.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use bitgun_cli::cli_args::{Cli, Commands};
use bitgun_cli::commands::{self, compose, generate, mutate, sequence};
use bitgun_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            seed,
            out_dir,
            config,
            noise,
            curve,
            rng_seed,
            json,
        } => generate::run(&generate::GenerateOptions {
            seed: seed.as_deref(),
            out_dir: out_dir.as_deref(),
            config: config.as_deref(),
            noise: noise.as_deref(),
            curve: curve.as_deref(),
            rng_seed,
            json,
        }),
        Commands::Inspect { seed, curve, json } => {
            commands::inspect::run(&seed, curve.as_deref(), json)
        }
        Commands::Mutate {
            seed,
            amount,
            distribution,
            count,
            rng_seed,
            json,
        } => mutate::run(&mutate::MutateOptions {
            seed: &seed,
            amount,
            distribution: &distribution,
            count,
            rng_seed,
            json,
        }),
        Commands::Sequence {
            seed,
            steps,
            step_size,
            rng_seed,
            json,
        } => sequence::run(&seed, steps, step_size, rng_seed, json),
        Commands::Similarity { a, b, json } => commands::similarity::run(&a, &b, json),
        Commands::Compose {
            weapon,
            envelope,
            oscillator,
            modulation,
            effect,
            pitch_bend,
            repeat,
            harmonics,
            rng_seed,
            json,
        } => {
            let request = compose::request(
                [weapon, envelope, oscillator, modulation],
                [effect, pitch_bend, repeat, harmonics],
            );
            compose::run(&request, rng_seed, json)
        }
        Commands::Waveform { seed, points, json } => {
            commands::waveform::run(&seed, points, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(commands::EXIT_INVALID_INPUT)
        }
    }
}
