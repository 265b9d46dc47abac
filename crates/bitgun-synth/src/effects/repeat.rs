//! Echo layouts that lengthen the buffer.
//!
//! The output duration is the nominal 0.6 s plus the space the layout needs.
//! Copies of the input are added at shifted offsets with geometric gain
//! falloff, then the whole result is clamped.

use bitgun_seed::ParameterVector;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::buffer::{SampleBuffer, DURATION_SECONDS, SAMPLE_RATE};

#[derive(Debug, Clone, Copy)]
struct Layout {
    count: u32,
    gap: f64,
    decay: f64,
}

impl Layout {
    fn new(params: &ParameterVector) -> Self {
        Self {
            count: 1 + (params.decay * 10.0).floor() as u32,
            gap: 0.05 + params.frequency * 0.15,
            decay: 0.2 + params.noise * 0.6,
        }
    }

    /// Total duration in seconds for a layout selector.
    fn duration(&self, selector: u8) -> f64 {
        let count = f64::from(self.count);
        match selector {
            1 => DURATION_SECONDS + count * self.gap,
            2 => DURATION_SECONDS + (count / 3.0).ceil() * self.gap * 3.0,
            _ => DURATION_SECONDS + count * self.gap * 1.5,
        }
    }
}

/// Output length in samples for a layout, `ceil(duration * 44100)`.
pub fn extended_len(selector: u8, params: &ParameterVector) -> usize {
    (Layout::new(params).duration(selector) * f64::from(SAMPLE_RATE)).ceil() as usize
}

fn overlay(out: &mut [f32], source: &[f32], start: usize, gain: f64) {
    if start >= out.len() {
        return;
    }
    for (dst, src) in out[start..].iter_mut().zip(source) {
        *dst += (f64::from(*src) * gain) as f32;
    }
}

/// Returns an extended copy of `buffer` with echoes laid out by `selector`.
///
/// Selector 0 returns the input unchanged. Selector 3 spaces echoes randomly
/// using `rng`; the other layouts draw nothing.
pub fn apply(
    buffer: &SampleBuffer,
    selector: u8,
    params: &ParameterVector,
    rng: &mut Pcg32,
) -> SampleBuffer {
    if selector == 0 {
        return buffer.clone();
    }

    let layout = Layout::new(params);
    let sr = f64::from(SAMPLE_RATE);
    let mut out = SampleBuffer::silent(extended_len(selector, params));
    let head = out.len().min(buffer.len());
    out[..head].copy_from_slice(&buffer[..head]);

    match selector {
        // evenly spaced
        1 => {
            for r in 1..=layout.count {
                let start = (sr * f64::from(r) * layout.gap).floor() as usize;
                let gain = (1.0 - layout.decay).powi(r as i32);
                overlay(&mut out, buffer, start, gain);
            }
        }
        // three-shot bursts, 30 ms apart within a burst
        2 => {
            for r in 1..=layout.count {
                let burst = (r - 1) / 3;
                let position = f64::from((r - 1) % 3);
                let offset = f64::from(burst) * layout.gap * 3.0 + position * 0.03;
                let start = (sr * offset).floor() as usize;
                let gain = (1.0 - layout.decay).powi(burst as i32) * (1.0 - position * 0.2);
                overlay(&mut out, buffer, start, gain);
            }
        }
        _ => {
            let mut last_start = 0.0;
            for r in 1..=layout.count {
                last_start += layout.gap * (0.7 + rng.gen::<f64>() * 0.6);
                let start = (sr * last_start).floor() as usize;
                let gain = (1.0 - layout.decay).powi(r as i32) * (0.7 + rng.gen::<f64>() * 0.3);
                overlay(&mut out, buffer, start, gain);
            }
        }
    }

    for s in out.iter_mut() {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::NOMINAL_LEN;
    use crate::rng::create_rng;

    fn constant(value: f32) -> SampleBuffer {
        SampleBuffer::from_samples(vec![value; NOMINAL_LEN])
    }

    #[test]
    fn test_extended_lengths() {
        // decay 0 -> one repeat; frequency 0 -> 50 ms gap
        let params = ParameterVector::new(0.0, 0.0, 0.0, 0.0);
        let samples = |seconds: f64| (seconds * 44_100.0).ceil() as usize;
        assert_eq!(extended_len(1, &params), samples(0.6 + 1.0 * 0.05));
        assert_eq!(extended_len(2, &params), samples(0.6 + 1.0 * 0.05 * 3.0));
        assert_eq!(extended_len(3, &params), samples(0.6 + 1.0 * 0.05 * 1.5));
    }

    #[test]
    fn test_even_layout_adds_decayed_copy() {
        let params = ParameterVector::new(0.0, 0.0, 0.0, 0.0);
        let out = apply(&constant(0.5), 1, &params, &mut create_rng(0));
        assert_eq!(out.len(), extended_len(1, &params));

        let start = (44_100.0 * 0.05f64).floor() as usize;
        assert_eq!(out[0], 0.5);
        // original plus 0.8 gain copy
        assert!((out[start + 10] - 0.9).abs() < 1e-6);
        // tail holds only the echo
        assert!((out[NOMINAL_LEN + 10] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_output_is_clamped() {
        let params = ParameterVector::new(0.0, 1.0, 0.0, 0.0);
        let out = apply(&constant(0.9), 2, &params, &mut create_rng(0));
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(out.contains(&1.0));
    }

    #[test]
    fn test_random_layout_is_reproducible() {
        let params = ParameterVector::new(0.3, 0.7, 0.4, 0.0);
        let a = apply(&constant(0.2), 3, &params, &mut create_rng(5));
        let b = apply(&constant(0.2), 3, &params, &mut create_rng(5));
        assert_eq!(a, b);
        assert_eq!(a.len(), extended_len(3, &params));
    }
}
