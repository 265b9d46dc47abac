//! Mono sample buffer.

use std::ops::{Deref, DerefMut};

/// Fixed output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Nominal sound duration in seconds.
pub const DURATION_SECONDS: f64 = 0.6;

/// Nominal buffer length: `round(44100 * 0.6)`.
pub const NOMINAL_LEN: usize = 26_460;

/// Seconds per sample.
pub(crate) const SAMPLE_PERIOD: f64 = 1.0 / SAMPLE_RATE as f64;

/// Time in seconds of sample `i`.
#[inline]
pub(crate) fn time_at(i: usize) -> f64 {
    i as f64 / SAMPLE_RATE as f64
}

/// Mono 32-bit float PCM at [`SAMPLE_RATE`]. Samples are kept in `[-1, 1]`
/// by every stage that writes them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    samples: Vec<f32>,
}

impl SampleBuffer {
    /// A silent buffer of `len` samples.
    pub fn silent(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// A silent buffer of nominal length.
    pub fn nominal() -> Self {
        Self::silent(NOMINAL_LEN)
    }

    /// Wraps existing samples.
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 * SAMPLE_PERIOD
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

impl Deref for SampleBuffer {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl DerefMut for SampleBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.samples
    }
}
