//! Bitgun Synthesis Backend
//!
//! Renders procedural weapon sound effects from a [`ParameterVector`] and
//! [`TraitSelectors`], or directly from a hex seed.
//!
//! # Pipeline
//!
//! 1. One of four generators (classic, laser, plasma, glitch) produces a
//!    nominal 0.6 s buffer at 44.1 kHz.
//! 2. The effect chain applies pitch bend, repeat, harmonics, and the
//!    always-on filter and limiter, in that order.
//! 3. The result is cached by rounded parameters and selectors.
//!
//! # Determinism
//!
//! Under the default [`NoiseMode::Seeded`] every stochastic stage draws from
//! a PCG32 stream derived with BLAKE3 from the cache key, so a seed always
//! renders the same samples.
//!
//! # Example
//!
//! ```
//! use bitgun_seed::SeedOptions;
//! use bitgun_synth::{encode_wav, SfxEngine};
//!
//! let mut engine = SfxEngine::default();
//! let rendered = engine.render_seed("00000000", &SeedOptions::default()).unwrap();
//! assert_eq!(rendered.buffer.len(), 26_460);
//!
//! let wav = encode_wav(&rendered.buffer);
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

pub mod buffer;
pub mod cache;
pub mod effects;
pub mod engine;
pub mod error;
pub mod generators;
pub mod rng;
pub mod sink;
pub mod wav;
pub mod waveform;

pub use bitgun_seed::{ParameterVector, TraitSelectors};
pub use buffer::{SampleBuffer, DURATION_SECONDS, NOMINAL_LEN, SAMPLE_RATE};
pub use cache::{CacheConfig, CacheKey, CachePolicy, RenderCache, DEFAULT_CACHE_CAPACITY};
pub use engine::{render_raw, EngineConfig, NoiseMode, Rendered, SfxEngine};
pub use error::{SynthError, SynthResult};
pub use generators::{generator_for, Generator, Voice};
pub use sink::{export_file_name, AudioSink, MemorySink, WavFileSink};
pub use wav::{encode_wav, pcm_hash, samples_to_pcm16, write_wav, WavFormat};
pub use waveform::{summarize, DEFAULT_WAVEFORM_POINTS};
