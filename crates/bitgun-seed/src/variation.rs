//! Seed mutation and random-walk sequences.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::curve::clamp01;
use crate::error::SeedError;
use crate::params::{parameters_to_seed, seed_to_numbers, ParameterVector, SeedOptions};
use crate::random::RandomSource;

/// Default change amount for [`create_related_seed`].
pub const DEFAULT_CHANGE_AMOUNT: f64 = 0.1;

/// Shape of the per-field perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// `(rand - 0.5) * 2 * range`.
    #[default]
    Uniform,
    /// Box-Muller standard normal scaled by `0.3 * range`.
    Normal,
    /// Magnitude `(rand*0.7 + 0.3) * range`, positive with probability 0.7.
    Biased,
}

impl Distribution {
    /// Returns the distribution's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Normal => "normal",
            Distribution::Biased => "biased",
        }
    }

    /// Draws one delta for a field with the given range.
    pub fn delta(&self, range: f64, rng: &mut impl RandomSource) -> f64 {
        match self {
            Distribution::Uniform => (rng.next_f64() - 0.5) * range * 2.0,
            Distribution::Normal => {
                let mut u = 0.0;
                while u == 0.0 {
                    u = rng.next_f64();
                }
                let mut v = 0.0;
                while v == 0.0 {
                    v = rng.next_f64();
                }
                let standard_normal = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
                standard_normal * 0.3 * range
            }
            Distribution::Biased => {
                let magnitude = (rng.next_f64() * 0.7 + 0.3) * range;
                if rng.next_f64() < 0.7 {
                    magnitude
                } else {
                    -magnitude
                }
            }
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Distribution::Uniform),
            "normal" => Ok(Distribution::Normal),
            "biased" => Ok(Distribution::Biased),
            _ => Err(SeedError::UnknownDistribution { name: s.to_string() }),
        }
    }
}

/// Options for [`get_random_variation`]. Per-field ranges override the shared range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationOptions {
    /// Range for `frequency`, if different from the shared range.
    pub frequency_range: Option<f64>,
    /// Range for `decay`, if different from the shared range.
    pub decay_range: Option<f64>,
    /// Range for `noise`, if different from the shared range.
    pub noise_range: Option<f64>,
    /// Range for `crush`, if different from the shared range.
    pub crush_range: Option<f64>,
    /// Shape of each delta.
    pub distribution: Distribution,
}

impl VariationOptions {
    /// Options with only a distribution set.
    pub fn with_distribution(distribution: Distribution) -> Self {
        Self {
            distribution,
            ..Self::default()
        }
    }
}

/// Perturbs every field by a random delta and clamps the result to `[0, 1]`.
pub fn get_random_variation(
    base: &ParameterVector,
    range: f64,
    options: &VariationOptions,
    rng: &mut impl RandomSource,
) -> ParameterVector {
    let ranges = [
        options.frequency_range.unwrap_or(range),
        options.decay_range.unwrap_or(range),
        options.noise_range.unwrap_or(range),
        options.crush_range.unwrap_or(range),
    ];
    let mut values = base.to_array();
    for (value, field_range) in values.iter_mut().zip(ranges) {
        *value = clamp01(*value + options.distribution.delta(field_range, rng));
    }
    ParameterVector::from_array(values)
}

/// Returns a nearby seed: linear decode, uniform variation, re-encode.
pub fn create_related_seed(seed: &str, change_amount: f64, rng: &mut impl RandomSource) -> String {
    let params = seed_to_numbers(seed, &SeedOptions::default());
    let varied = get_random_variation(&params, change_amount, &VariationOptions::default(), rng);
    parameters_to_seed(&varied)
}

/// A random walk through seed space.
///
/// The walk is restartable: each call to [`SeedSequence::walk`] starts again
/// from `start`. It is only reproducible when the random source is.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSequence {
    start: String,
    steps: usize,
    step_size: f64,
}

impl SeedSequence {
    /// Creates a sequence of `steps` seeds (at least one: the start seed).
    pub fn new(start: &str, steps: usize, step_size: f64) -> Self {
        Self {
            start: start.to_string(),
            steps: steps.max(1),
            step_size,
        }
    }

    /// Number of seeds a walk yields.
    pub fn len(&self) -> usize {
        self.steps
    }

    /// Always false; a sequence contains at least its start seed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Starts a walk drawing from `rng`.
    pub fn walk<'a, R: RandomSource>(&'a self, rng: &'a mut R) -> SeedWalk<'a, R> {
        SeedWalk {
            sequence: self,
            rng,
            current: None,
            emitted: 0,
        }
    }
}

/// Iterator over a [`SeedSequence`].
pub struct SeedWalk<'a, R> {
    sequence: &'a SeedSequence,
    rng: &'a mut R,
    current: Option<String>,
    emitted: usize,
}

impl<R: RandomSource> Iterator for SeedWalk<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.sequence.steps {
            return None;
        }
        let next = match &self.current {
            // the start seed is yielded as given
            None => self.sequence.start.clone(),
            Some(prev) => create_related_seed(prev, self.sequence.step_size, &mut *self.rng),
        };
        self.emitted += 1;
        self.current = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.steps - self.emitted;
        (remaining, Some(remaining))
    }
}

impl<R: RandomSource> ExactSizeIterator for SeedWalk<'_, R> {}

/// Collects a `steps`-long random walk starting at `start`.
pub fn generate_seed_sequence(
    start: &str,
    steps: usize,
    step_size: f64,
    rng: &mut impl RandomSource,
) -> Vec<String> {
    SeedSequence::new(start, steps, step_size).walk(rng).collect()
}
