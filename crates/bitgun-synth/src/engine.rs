//! Render entry point: seed decoding, cache, generator dispatch, effects.

use std::sync::Arc;

use bitgun_seed::{seed_bytes_to_numbers, ParameterVector, Seed, SeedOptions, TraitSelectors};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::buffer::SampleBuffer;
use crate::cache::{CacheConfig, CacheKey, RenderCache};
use crate::effects;
use crate::error::SynthResult;
use crate::generators::{generator_for, Voice};
use crate::rng::{create_component_rng, derive_text_seed, entropy_seed};

/// Where synthesis noise comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    /// Noise stream seeded from the cache key; identical inputs give identical output.
    #[default]
    Seeded,
    /// Noise stream seeded from the OS on every render.
    Entropy,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Noise source for every stochastic stage.
    pub noise: NoiseMode,
    /// Render cache size and policy.
    pub cache: CacheConfig,
}

/// A finished render together with the values that produced it.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Canonical seed.
    pub seed: Seed,
    /// Parameters after curve shaping and clamping.
    pub params: ParameterVector,
    /// Selectors decoded from the raw seed bytes.
    pub traits: TraitSelectors,
    /// Shared with the cache; treat as read-only.
    pub buffer: Arc<SampleBuffer>,
}

/// Renders generator output through the effect chain, bypassing the cache.
///
/// # Arguments
/// * `params` - Parameters; clamped before use
/// * `traits` - Selectors; masked to two bits before use
/// * `base_seed` - Base of every stochastic stream in this render
pub fn render_raw(params: &ParameterVector, traits: &TraitSelectors, base_seed: u32) -> SampleBuffer {
    let voice = Voice::new(params, traits);
    let generator = generator_for(traits.weapon());
    debug!(
        generator = generator.name(),
        envelope = voice.envelope,
        oscillator = voice.oscillator,
        modulation = voice.modulation,
        effect = voice.effect,
        "dispatching generator"
    );

    let mut rng = create_component_rng(base_seed, generator.name());
    let buffer = generator.synthesize(&voice, &mut rng);

    let mut repeat_rng = create_component_rng(base_seed, "repeat");
    effects::apply_chain(buffer, &voice.params, traits, &mut repeat_rng)
}

/// Stateful renderer owning the cache.
///
/// Not synchronized; wrap in a mutex to share between threads.
#[derive(Debug, Default)]
pub struct SfxEngine {
    config: EngineConfig,
    cache: RenderCache,
}

impl SfxEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: RenderCache::new(config.cache),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Validates, decodes and renders a seed.
    ///
    /// Selectors come from the raw seed bytes; `options` only shapes the
    /// continuous parameters.
    ///
    /// # Errors
    /// [`SeedError::InvalidSeed`](bitgun_seed::SeedError::InvalidSeed) when
    /// `seed` is not 1-8 hex digits.
    #[instrument(skip(self, options), fields(curve = %options.curve.as_str()))]
    pub fn render_seed(&mut self, seed: &str, options: &SeedOptions) -> SynthResult<Rendered> {
        let seed = Seed::parse(seed)?;
        let params = seed_bytes_to_numbers(seed.bytes(), options);
        let traits = TraitSelectors::from_seed(&seed);
        let buffer = self.render(&params, &traits);
        Ok(Rendered {
            seed,
            params,
            traits,
            buffer,
        })
    }

    /// Renders through the cache.
    ///
    /// A hit returns the cached allocation itself.
    pub fn render(&mut self, params: &ParameterVector, traits: &TraitSelectors) -> Arc<SampleBuffer> {
        let params = params.clamped();
        let key = CacheKey::new(&params, traits);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let base_seed = match self.config.noise {
            NoiseMode::Seeded => derive_text_seed(&key.to_string()),
            NoiseMode::Entropy => entropy_seed(),
        };
        let buffer = Arc::new(render_raw(&params, traits, base_seed));
        self.cache.insert(key, Arc::clone(&buffer));
        buffer
    }

    /// Drops every cached render.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
