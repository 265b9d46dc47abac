//! Always-on post-processing: a swept one-pole filter, then a soft limiter.

use bitgun_seed::ParameterVector;

use crate::buffer::SampleBuffer;

/// Output ceiling of the limiter, `tanh(x * 1.2) * 0.85`.
pub const LIMITER_CEILING: f64 = 0.85;

/// Filters and limits `buffer` in place.
///
/// The feedback coefficient sweeps linearly from 0.7 at the start toward 0.1
/// at the end, and the filtered signal is blended in by `0.3 + crush * 0.5`.
pub fn apply(buffer: &mut SampleBuffer, params: &ParameterVector) {
    let blend = 0.3 + params.crush * 0.5;
    let len = buffer.len() as f64;

    let mut prev = 0.0f64;
    for (i, slot) in buffer.iter_mut().enumerate() {
        let cutoff = 0.1 + (1.0 - i as f64 / len) * 0.6;
        let x = f64::from(*slot);
        let filtered = x - prev * cutoff;
        *slot = (x * (1.0 - blend) + filtered * blend) as f32;
        // feedback reads the stored sample
        prev = f64::from(*slot);
    }

    for slot in buffer.iter_mut() {
        *slot = ((f64::from(*slot) * 1.2).tanh() * LIMITER_CEILING) as f32;
    }
}
