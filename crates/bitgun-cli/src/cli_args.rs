//! CLI argument definitions for the `bitgun` command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bitgun - procedural weapon sound effects from 8-digit hex seeds
#[derive(Parser, Debug)]
#[command(name = "bitgun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a seed and export it as bitgun_<SEED>.wav
    Generate {
        /// Seed (1-8 hex digits); random when omitted
        #[arg(short, long)]
        seed: Option<String>,

        /// Output directory (default: config output_dir, then current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// JSON config file with seed options, engine settings, and output_dir
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Noise source for synthesis
        #[arg(long, value_parser = ["seeded", "entropy"])]
        noise: Option<String>,

        /// Response curve used to derive parameters
        #[arg(long)]
        curve: Option<String>,

        /// Seed for the random source used when no seed is given
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the selectors and parameters a seed decodes to
    Inspect {
        /// Seed to inspect
        #[arg(short, long)]
        seed: String,

        /// Response curve used to derive parameters
        #[arg(long)]
        curve: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Produce seeds related to an input seed
    Mutate {
        /// Seed to mutate
        #[arg(short, long)]
        seed: String,

        /// Maximum change per parameter
        #[arg(short, long, default_value_t = 0.1)]
        amount: f64,

        /// Shape of the random change
        #[arg(short, long, default_value = "uniform", value_parser = ["uniform", "normal", "biased"])]
        distribution: String,

        /// Number of related seeds
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Seed for the random source
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Random walk through seed space
    Sequence {
        /// Starting seed
        #[arg(short, long)]
        seed: String,

        /// Number of seeds, including the start
        #[arg(long, default_value_t = 10)]
        steps: usize,

        /// Change per step
        #[arg(long, default_value_t = 0.05)]
        step_size: f64,

        /// Seed for the random source
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Similarity of two seeds, from 0 to 1
    Similarity {
        /// First seed
        #[arg(short, long)]
        a: String,

        /// Second seed
        #[arg(short, long)]
        b: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Build a seed from selector values; missing selectors are random
    Compose {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        weapon: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        envelope: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        oscillator: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        modulation: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        effect: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        pitch_bend: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        repeat: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        harmonics: Option<u8>,

        /// Seed for the random source
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the waveform summary of a rendered seed
    Waveform {
        /// Seed to render
        #[arg(short, long)]
        seed: String,

        /// Number of summary points
        #[arg(short, long, default_value_t = 800)]
        points: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
