//! Pitch bend by time-varying sample shift.
//!
//! Each output index reads from `i - floor(factor * 1000)`. This is a shift,
//! not an interpolating resampler; indices outside the buffer read as silence.

use bitgun_seed::ParameterVector;

use crate::buffer::{time_at, SampleBuffer};
use crate::generators::waves;

/// Bend factor for a selector at time `t`.
fn bend_factor(selector: u8, t: f64, depth: f64, rate: f64) -> f64 {
    match selector {
        // falling, classic gun falloff
        1 => (-t * rate).exp() * depth,
        // rising
        2 => (1.0 - (-t * rate).exp()) * depth,
        // wobble
        3 => waves::sine(rate, t) * depth,
        _ => 0.0,
    }
}

/// Applies the pitch bend selected by `selector` in place. Selector 0 is a no-op.
pub fn apply(buffer: &mut SampleBuffer, selector: u8, params: &ParameterVector) {
    if selector == 0 {
        return;
    }

    let depth = 0.3 + params.frequency * 0.7;
    let rate = 2.0 + params.decay * 8.0;

    let source = buffer.to_vec();
    let len = source.len() as i64;
    for (i, slot) in buffer.iter_mut().enumerate() {
        let shift = (bend_factor(selector, time_at(i), depth, rate) * 1000.0).floor() as i64;
        let src = i as i64 - shift;
        *slot = if (0..len).contains(&src) {
            source[src as usize]
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_train(len: usize) -> SampleBuffer {
        SampleBuffer::from_samples((0..len).map(|i| i as f32 / len as f32).collect())
    }

    #[test]
    fn test_selector_zero_is_noop() {
        let mut buf = impulse_train(1000);
        let before = buf.clone();
        apply(&mut buf, 0, &ParameterVector::new(1.0, 1.0, 0.0, 0.0));
        assert_eq!(buf, before);
    }

    #[test]
    fn test_falling_bend_reads_shifted_source() {
        // frequency 1.0 / decay 0.0: depth 1.0, rate 2.0
        let original = impulse_train(5000);
        let mut buf = original.clone();
        apply(&mut buf, 1, &ParameterVector::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(buf.len(), 5000);

        for (i, s) in buf.iter().enumerate() {
            let t = i as f64 / 44_100.0;
            let shift = ((-t * 2.0).exp() * 1000.0).floor() as i64;
            let src = i as i64 - shift;
            let expected = if src >= 0 { original[src as usize] } else { 0.0 };
            assert_eq!(*s, expected, "index {i}");
        }
    }

    #[test]
    fn test_falling_bend_silences_head() {
        let original = impulse_train(5000);
        let mut buf = original.clone();
        apply(&mut buf, 1, &ParameterVector::new(1.0, 0.0, 0.0, 0.0));
        // the shift shrinks over time, so the first in-range read lands near 958
        assert!(buf[..950].iter().all(|s| *s == 0.0));
        assert_eq!(buf[958], original[1]);
    }

    #[test]
    fn test_wobble_samples_come_from_source() {
        let original = impulse_train(3000);
        let mut buf = original.clone();
        apply(&mut buf, 3, &ParameterVector::new(0.5, 0.5, 0.0, 0.0));
        assert!(buf.iter().all(|s| *s == 0.0 || original.contains(s)));
    }
}
