//! Waveform and shaping primitives shared by the generators.
//!
//! Oscillators here are evaluated directly from `freq * t` rather than from an
//! accumulated phase, so a time-varying frequency also warps the phase.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;

pub(crate) const TWO_PI: f64 = 2.0 * PI;

/// Sign with `sign(0) == 0`.
#[inline]
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rounds half toward positive infinity.
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Quantizes `sample` to steps of `1 / depth`.
#[inline]
pub(crate) fn quantize(sample: f64, depth: f64) -> f64 {
    round_half_up(sample * depth) / depth
}

#[inline]
pub(crate) fn sine(freq: f64, t: f64) -> f64 {
    (TWO_PI * freq * t).sin()
}

#[inline]
pub(crate) fn square(freq: f64, t: f64) -> f64 {
    sign(sine(freq, t))
}

#[inline]
pub(crate) fn saw(freq: f64, t: f64) -> f64 {
    2.0 * ((freq * t) % 1.0) - 1.0
}

#[inline]
pub(crate) fn triangle(freq: f64, t: f64) -> f64 {
    (4.0 * ((freq * t) % 1.0) - 2.0).abs() - 1.0
}

/// Uniform white noise in `[-1, 1)`.
#[inline]
pub(crate) fn white(rng: &mut Pcg32) -> f64 {
    rng.gen::<f64>() * 2.0 - 1.0
}

/// Linear attack ramp: `t / attack` while `t < attack`.
#[inline]
pub(crate) fn attack_ramp(t: f64, attack: f64) -> Option<f64> {
    (t < attack).then(|| t / attack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(square(100.0, 0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn test_waves_in_range() {
        for i in 0..1000 {
            let t = i as f64 / 44_100.0;
            for v in [sine(333.0, t), square(333.0, t), saw(333.0, t), triangle(333.0, t)] {
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_triangle_shape() {
        // phase 0 → +1, phase 0.5 → -1
        assert_eq!(triangle(1.0, 0.0), 1.0);
        assert_eq!(triangle(1.0, 0.5), -1.0);
        assert_eq!(saw(1.0, 0.0), -1.0);
    }
}
