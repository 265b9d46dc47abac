//! Buffer-level effects applied after a generator.
//!
//! The chain always runs in the same order: pitch bend, repeat, harmonics,
//! post-processing. Only post-processing is unconditional; the other stages
//! are skipped when their selector is 0.

pub mod harmonics;
pub mod pitch_bend;
pub mod post;
pub mod repeat;

use bitgun_seed::{ParameterVector, TraitSelectors};
use rand_pcg::Pcg32;
use tracing::debug;

use crate::buffer::SampleBuffer;

/// Applies the full effect chain to a generator's output.
///
/// # Arguments
/// * `buffer` - Generator output, nominal length
/// * `params` - Clamped parameters
/// * `traits` - Selectors; only the low two bits of each are read
/// * `repeat_rng` - Stream for the randomized repeat layout
///
/// # Returns
/// The processed buffer, longer than nominal when a repeat layout is active
pub fn apply_chain(
    mut buffer: SampleBuffer,
    params: &ParameterVector,
    traits: &TraitSelectors,
    repeat_rng: &mut Pcg32,
) -> SampleBuffer {
    let pitch_bend = traits.pitch_bend_type & 3;
    let repeat = traits.repeat_type & 3;
    let harmonics = traits.harmonics_type & 3;
    debug!(pitch_bend, repeat, harmonics, "applying effect chain");

    pitch_bend::apply(&mut buffer, pitch_bend, params);
    if repeat > 0 {
        buffer = repeat::apply(&buffer, repeat, params, repeat_rng);
    }
    harmonics::apply(&mut buffer, harmonics, params);
    post::apply(&mut buffer, params);
    buffer
}
