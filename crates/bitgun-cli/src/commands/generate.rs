//! Generate command implementation
//!
//! Renders a seed and exports it through a [`WavFileSink`].

use anyhow::Result;
use bitgun_seed::generate_seed;
use bitgun_synth::{pcm_hash, AudioSink, NoiseMode, SfxEngine, SynthError, WavFileSink};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use super::json_output::{GenerateOutput, JsonError};
use super::{fail, field, print_json, seed_error, with_curve, EXIT_INVALID_INPUT, EXIT_RENDER_FAILURE};
use crate::config::CliConfig;
use crate::rng::CliRng;

/// Flags of the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    pub seed: Option<&'a str>,
    pub out_dir: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub noise: Option<&'a str>,
    pub curve: Option<&'a str>,
    pub rng_seed: Option<u64>,
    pub json: bool,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 render or export failure
pub fn run(opts: &GenerateOptions<'_>) -> Result<ExitCode> {
    let json = opts.json;
    let mut config = CliConfig::load(opts.config)?;

    match opts.noise {
        Some("entropy") => config.engine.noise = NoiseMode::Entropy,
        Some(_) => config.engine.noise = NoiseMode::Seeded,
        None => {}
    }
    let options = match with_curve(config.seed, opts.curve) {
        Ok(options) => options,
        Err(err) => return fail(json, err, EXIT_INVALID_INPUT),
    };

    let seed_text = match opts.seed {
        Some(seed) => seed.to_string(),
        None => match generate_seed(&mut CliRng::new(opts.rng_seed)) {
            Ok(seed) => seed,
            Err(err) => return fail(json, seed_error(&err), EXIT_RENDER_FAILURE),
        },
    };
    debug!(seed = %seed_text, noise = ?config.engine.noise, "generating");

    let mut engine = SfxEngine::new(config.engine);
    debug!(
        policy = ?engine.cache().policy(),
        capacity = engine.cache().capacity(),
        "engine ready"
    );
    let rendered = match engine.render_seed(&seed_text, &options) {
        Ok(rendered) => rendered,
        Err(SynthError::Seed(err)) => return fail(json, seed_error(&err), EXIT_INVALID_INPUT),
        Err(err) => return fail(json, JsonError::new(err.code(), err.to_string()), EXIT_RENDER_FAILURE),
    };

    let out_dir: PathBuf = opts
        .out_dir
        .map(Path::to_path_buf)
        .or(config.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut sink = WavFileSink::new(out_dir, rendered.seed);
    if let Err(err) = sink.enqueue(&rendered.buffer) {
        return fail(json, JsonError::new(err.code(), err.to_string()), EXIT_RENDER_FAILURE);
    }
    let path = sink
        .last_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let output = GenerateOutput {
        success: true,
        seed: rendered.seed.to_string(),
        weapon: rendered.traits.weapon().to_string(),
        params: rendered.params,
        traits: rendered.traits,
        noise: engine.config().noise,
        samples: rendered.buffer.len(),
        duration_seconds: rendered.buffer.duration_seconds(),
        pcm_hash: pcm_hash(&rendered.buffer),
        path,
    };

    if json {
        print_json(&output)?;
    } else {
        print_human(&output);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_human(output: &GenerateOutput) {
    println!("{} {}", "Generated".green().bold(), output.seed.bold());
    field("weapon", &output.weapon);
    let p = &output.params;
    field(
        "params",
        format!(
            "frequency {:.3}  decay {:.3}  noise {:.3}  crush {:.3}",
            p.frequency, p.decay, p.noise, p.crush
        ),
    );
    field("selectors", format!("{:?}", output.traits.to_array()));
    field("noise", format!("{:?}", output.noise).to_lowercase());
    field(
        "samples",
        format!("{} ({:.3}s)", output.samples, output.duration_seconds),
    );
    field("pcm hash", &output.pcm_hash[..16]);
    field("written", output.path.cyan());
}
