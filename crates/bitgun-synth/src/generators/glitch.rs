//! Glitch: a Bernoulli trigger per sample drives digital artifacts.
//!
//! Each sample first draws `is_glitch` with probability `density`. Every
//! later stage reads that flag. The sample-and-hold value and the decimation
//! source both live in the loop, so renders never share state.

use rand::Rng;
use rand_pcg::Pcg32;

use super::waves::{self, quantize, white};
use super::{Generator, Voice};
use crate::buffer::{time_at, SampleBuffer, NOMINAL_LEN};

const ATTACK: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Setup {
    base_freq: f64,
    density: f64,
    severity: f64,
    bit_depth: f64,
    pulse_width: f64,
    stutter_rate: f64,
    decimation: usize,
}

impl Setup {
    fn new(voice: &Voice) -> Self {
        let p = &voice.params;
        Self {
            base_freq: 80.0 + p.frequency * 300.0,
            density: 0.1 + p.noise * 0.5,
            severity: 0.4 + p.crush * 0.6,
            bit_depth: 2.0 + (p.crush * 6.0).floor(),
            pulse_width: 0.1 + p.noise * 0.4,
            stutter_rate: 40.0 + (p.frequency * 100.0).floor(),
            decimation: 1 + (p.crush * 8.0).floor() as usize,
        }
    }
}

/// Loop-local state carried between samples.
#[derive(Debug, Default)]
struct GlitchState {
    held: Option<f64>,
}

type EnvelopeFn = fn(f64, &mut Pcg32) -> f64;
/// `(setup, freq, t, is_glitch, rng)`
type OscillatorFn = fn(&Setup, f64, f64, bool, &mut Pcg32) -> f64;

const ENVELOPES: [EnvelopeFn; 4] = [
    |t, _| (-t * 10.0).exp(),
    // stepped in 50 ms increments
    |t, _| (-((t * 20.0).floor() / 20.0) * 8.0).exp(),
    |t, _| (-t * 8.0).exp() * (0.7 + 0.3 * waves::sine(50.0, t)),
    |t, rng| (-t * 6.0).exp() * if rng.gen::<f64>() < 0.2 { 0.2 } else { 1.0 },
];

const OSCILLATORS: [OscillatorFn; 4] = [
    |_, freq, t, _, _| waves::square(freq, t),
    |_, freq, t, glitch, _| {
        let saw = waves::saw(freq, t);
        if glitch {
            -saw
        } else {
            saw
        }
    },
    |_, freq, t, glitch, rng| {
        let burst = white(rng);
        if glitch {
            burst
        } else {
            burst * 0.3 + waves::square(freq, t) * 0.7
        }
    },
    |s, freq, t, glitch, _| {
        let pulse = if (freq * t) % 1.0 < s.pulse_width { 1.0 } else { -1.0 };
        if glitch {
            pulse * -0.7
        } else {
            pulse
        }
    },
];

/// Glitch generator (weapon type 3).
#[derive(Debug, Clone, Copy, Default)]
pub struct Glitch;

impl Glitch {
    #[allow(clippy::too_many_arguments)]
    fn modulate(
        setup: &Setup,
        selector: usize,
        state: &mut GlitchState,
        osc: f64,
        freq: f64,
        t: f64,
        glitch: bool,
        rng: &mut Pcg32,
    ) -> f64 {
        match selector {
            // sample and hold; a zero hold falls back to the live value
            0 => {
                if rng.gen::<f64>() < setup.density * 0.5 {
                    state.held = Some(osc);
                }
                match state.held {
                    Some(held) if glitch && held != 0.0 => held,
                    _ => osc,
                }
            }
            1 if glitch && ((t * setup.stutter_rate).floor() as u64) % 2 == 0 => 0.0,
            2 if glitch => waves::sine(freq * (1.0 + setup.severity), t),
            3 if glitch => waves::sine(freq * (1.0 + setup.severity * 3.0).floor(), t),
            _ => osc,
        }
    }

    fn apply_effect(setup: &Setup, selector: usize, sample: f64, i: usize, written: &[f32]) -> f64 {
        match selector {
            0 => quantize(sample, setup.bit_depth),
            // asymmetric soft clip of the positive side
            1 if sample > 0.3 => 0.3 + (sample - 0.3) * 0.6,
            1 => sample,
            2 => {
                if i % setup.decimation != 0 {
                    let anchor = (i / setup.decimation) * setup.decimation;
                    f64::from(written[anchor])
                } else {
                    sample
                }
            }
            _ => {
                let shaped = if (sample > 0.0 && sample < 0.4) || (sample < 0.0 && sample > -0.4) {
                    sample * 0.5
                } else {
                    sample
                };
                quantize(shaped, setup.bit_depth)
            }
        }
    }
}

impl Generator for Glitch {
    fn name(&self) -> &'static str {
        "glitch"
    }

    fn synthesize(&self, voice: &Voice, rng: &mut Pcg32) -> SampleBuffer {
        let setup = Setup::new(voice);
        let envelope = ENVELOPES[voice.envelope];
        let oscillator = OSCILLATORS[voice.oscillator];
        let mut state = GlitchState::default();

        let mut out = SampleBuffer::silent(NOMINAL_LEN);
        for i in 0..out.len() {
            let t = time_at(i);
            let glitch = rng.gen::<f64>() < setup.density;

            let env = if t < ATTACK {
                t / ATTACK
            } else {
                envelope(t, rng)
            };

            let freq = if glitch {
                setup.base_freq * (0.5 + rng.gen::<f64>() * 1.5)
            } else {
                setup.base_freq
            };

            let osc = oscillator(&setup, freq, t, glitch, rng);
            let osc = Self::modulate(&setup, voice.modulation, &mut state, osc, freq, t, glitch, rng);

            let sample = Self::apply_effect(&setup, voice.effect, osc * env, i, &out);
            out[i] = sample.clamp(-1.0, 1.0) as f32;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use bitgun_seed::ParameterVector;

    fn voice(params: ParameterVector, modulation: usize, effect: usize) -> Voice {
        Voice {
            params,
            envelope: 0,
            oscillator: 0,
            modulation,
            effect,
        }
    }

    #[test]
    fn test_decimation_holds_anchor_samples() {
        // crush 1.0 -> decimation of 9
        let v = voice(ParameterVector::new(0.4, 0.5, 0.5, 1.0), 1, 2);
        let out = Glitch.synthesize(&v, &mut create_rng(3));
        for i in 0..out.len() {
            let anchor = (i / 9) * 9;
            assert_eq!(out[i], out[anchor], "sample {i}");
        }
    }

    #[test]
    fn test_quantized_to_bit_depth() {
        // crush 0.0 -> depth 2, so every sample is a multiple of 0.5
        let v = voice(ParameterVector::new(0.2, 0.5, 0.3, 0.0), 2, 0);
        let out = Glitch.synthesize(&v, &mut create_rng(11));
        for s in out.iter() {
            let steps = f64::from(*s) * 2.0;
            assert!((steps - steps.round()).abs() < 1e-6, "{s} not on grid");
        }
    }

    #[test]
    fn test_independent_renders_match() {
        let v = voice(ParameterVector::new(0.7, 0.2, 0.9, 0.6), 0, 3);
        let a = Glitch.synthesize(&v, &mut create_rng(99));
        let b = Glitch.synthesize(&v, &mut create_rng(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_asymmetric_clip() {
        let setup = Setup::new(&voice(ParameterVector::default(), 0, 1));
        let clipped = Glitch::apply_effect(&setup, 1, 0.8, 0, &[]);
        assert!((clipped - 0.6).abs() < 1e-12);
        assert_eq!(Glitch::apply_effect(&setup, 1, -0.8, 0, &[]), -0.8);
    }
}
