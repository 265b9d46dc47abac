//! Harmonic blend with time-compressed copies of the buffer.

use bitgun_seed::ParameterVector;

use crate::buffer::SampleBuffer;

/// Blends in harmonics selected by `selector` in place. Selector 0 is a no-op.
///
/// - 1: octave up, reading index `i / 2`
/// - 2: fifth up, reading index `2i / 3`
/// - 3: weighted sum of `i / 2`, `i / 4` and `2i / 3`
///
/// Selectors 1 and 2 leave the final sample untouched.
pub fn apply(buffer: &mut SampleBuffer, selector: u8, params: &ParameterVector) {
    if selector == 0 || buffer.is_empty() {
        return;
    }

    let strength = 0.2 + params.noise * 0.4;
    let source = buffer.to_vec();
    let len = source.len();
    let at = |i: usize| f64::from(source[i]);

    let end = if selector == 3 { len } else { len - 1 };

    for i in 0..end {
        let harmonic = match selector {
            1 => at(i / 2),
            2 => at(i * 2 / 3),
            _ => at(i / 2) * 0.3 + at(i / 4) * 0.15 + at(i * 2 / 3) * 0.2,
        };
        buffer[i] = (f64::from(buffer[i]) * (1.0 - strength) + harmonic * strength) as f32;
    }
}
