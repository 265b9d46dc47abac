//! Per-sample synthesis algorithms, one per weapon type.
//!
//! Every generator follows the same per-sample structure:
//! envelope → frequency → oscillator → modulation → noise mix → effect → clamp.
//! The four categorical stages are looked up in small tables of pure
//! functions indexed by the corresponding selector:
//!
//! - `classic` - 60-200 Hz decaying sweep
//! - `laser` - rising exponential sweep from 300 Hz up
//! - `plasma` - vibrato hum over a filtered noise bed, variable length
//! - `glitch` - Bernoulli-triggered digital glitches

pub mod classic;
pub mod glitch;
pub mod laser;
pub mod plasma;
pub(crate) mod waves;

use bitgun_seed::{ParameterVector, TraitSelectors, WeaponType};
use rand_pcg::Pcg32;

use crate::buffer::SampleBuffer;

pub use classic::Classic;
pub use glitch::Glitch;
pub use laser::Laser;
pub use plasma::Plasma;

/// The inputs a generator reads: parameters plus its four selectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    /// Clamped continuous parameters.
    pub params: ParameterVector,
    /// Envelope selector (0-3).
    pub envelope: usize,
    /// Oscillator selector (0-3).
    pub oscillator: usize,
    /// Modulation selector (0-3).
    pub modulation: usize,
    /// Per-sample effect selector (0-3).
    pub effect: usize,
}

impl Voice {
    /// Builds a voice, clamping parameters and masking selectors to two bits.
    pub fn new(params: &ParameterVector, traits: &TraitSelectors) -> Self {
        Self {
            params: params.clamped(),
            envelope: (traits.envelope_type & 3) as usize,
            oscillator: (traits.oscillator_type & 3) as usize,
            modulation: (traits.modulation_type & 3) as usize,
            effect: (traits.effect_type & 3) as usize,
        }
    }
}

/// Common trait for the four weapon generators.
pub trait Generator {
    /// Stable name, also used to derive the generator's RNG stream.
    fn name(&self) -> &'static str;

    /// Renders a nominal-length buffer.
    ///
    /// # Arguments
    /// * `voice` - Parameters and selectors
    /// * `rng` - Deterministic RNG for noise and triggers
    ///
    /// # Returns
    /// Samples in `[-1.0, 1.0]`
    fn synthesize(&self, voice: &Voice, rng: &mut Pcg32) -> SampleBuffer;
}

/// Returns the generator for a weapon type.
pub fn generator_for(weapon: WeaponType) -> &'static dyn Generator {
    match weapon {
        WeaponType::Classic => &Classic,
        WeaponType::Laser => &Laser,
        WeaponType::Plasma => &Plasma,
        WeaponType::Glitch => &Glitch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::NOMINAL_LEN;
    use crate::rng::create_rng;

    fn all_voices() -> impl Iterator<Item = Voice> {
        let corners = [
            ParameterVector::new(0.0, 0.0, 0.0, 0.0),
            ParameterVector::new(1.0, 1.0, 1.0, 1.0),
            ParameterVector::new(0.3, 0.8, 0.5, 0.1),
        ];
        corners.into_iter().flat_map(|params| {
            (0..4).flat_map(move |envelope| {
                (0..4).flat_map(move |oscillator| {
                    (0..4).map(move |modulation| Voice {
                        params,
                        envelope,
                        oscillator,
                        modulation,
                        effect: (envelope + oscillator + modulation) % 4,
                    })
                })
            })
        })
    }

    #[test]
    fn test_every_generator_stays_in_range() {
        let weapons = [
            WeaponType::Classic,
            WeaponType::Laser,
            WeaponType::Plasma,
            WeaponType::Glitch,
        ];
        for weapon in weapons {
            let generator = generator_for(weapon);
            for (n, voice) in all_voices().enumerate().step_by(5) {
                let mut rng = create_rng(n as u32);
                let out = generator.synthesize(&voice, &mut rng);
                assert_eq!(out.len(), NOMINAL_LEN, "{}", generator.name());
                assert!(
                    out.iter().all(|s| s.is_finite() && (-1.0..=1.0).contains(s)),
                    "{} out of range for {voice:?}",
                    generator.name()
                );
            }
        }
    }

    #[test]
    fn test_voice_clamps_inputs() {
        let params = ParameterVector {
            frequency: 3.0,
            decay: -1.0,
            noise: 0.5,
            crush: 0.5,
        };
        let traits = TraitSelectors {
            envelope_type: 7,
            ..TraitSelectors::default()
        };
        let voice = Voice::new(&params, &traits);
        assert_eq!(voice.params.frequency, 1.0);
        assert_eq!(voice.params.decay, 0.0);
        assert_eq!(voice.envelope, 3);
    }
}
