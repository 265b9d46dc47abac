//! Plasma: a vibrato hum over an enveloped noise bed.
//!
//! The audible length is `0.6 * (0.7 + decay * 0.6)` seconds; the buffer stays
//! nominal length and everything past the audible end is silence.

use rand::Rng;
use rand_pcg::Pcg32;

use super::waves::{self, attack_ramp, quantize, white};
use super::{Generator, Voice};
use crate::buffer::{time_at, SampleBuffer, DURATION_SECONDS, NOMINAL_LEN};

#[derive(Debug, Clone, Copy)]
struct Setup {
    base_freq: f64,
    noise_factor: f64,
    resonance: f64,
    duration: f64,
    attack: f64,
    mod_freq: f64,
    bit_depth: f64,
}

impl Setup {
    fn new(voice: &Voice) -> Self {
        let p = &voice.params;
        Self {
            base_freq: 100.0 + p.frequency * 200.0,
            noise_factor: 0.3 + p.noise * 0.6,
            resonance: 0.4 + p.crush * 0.4,
            duration: plasma_duration(p.decay),
            attack: 0.005 + p.crush * 0.02,
            mod_freq: 80.0 + p.frequency * 120.0,
            bit_depth: 4.0 + (p.crush * 8.0).floor(),
        }
    }
}

/// Audible plasma length in seconds for a decay parameter.
pub fn plasma_duration(decay: f64) -> f64 {
    DURATION_SECONDS * (0.7 + decay.clamp(0.0, 1.0) * 0.6)
}

/// `(normalized time after attack, t, rng)`
type EnvelopeFn = fn(f64, f64, &mut Pcg32) -> f64;
type OscillatorFn = fn(&Setup, f64, f64, &mut Pcg32) -> f64;
type ModulationFn = fn(f64, f64, &mut Pcg32) -> f64;
type EffectFn = fn(&Setup, f64, f64, f64) -> f64;

const ENVELOPES: [EnvelopeFn; 4] = [
    |nt, _, _| (-nt * 5.0).exp(),
    // 30 Hz pulsing
    |nt, t, _| (-nt * 3.0).exp() * (0.7 + 0.3 * waves::sine(30.0, t)),
    |nt, _, _| (1.0 - nt * 1.2).max(0.0),
    // bubbling
    |nt, _, rng| (-nt * 4.0).exp() * (0.8 + 0.2 * rng.gen::<f64>()),
];

const OSCILLATORS: [OscillatorFn; 4] = [
    |_, freq, t, _| {
        (waves::sine(freq, t) + 0.5 * waves::sine(freq * 1.5, t) + 0.25 * waves::sine(freq * 2.7, t))
            / 1.75
    },
    |s, freq, t, _| (waves::TWO_PI * freq * t + 3.0 * waves::sine(s.mod_freq, t)).sin(),
    |s, freq, t, _| {
        (waves::square(freq, t) + s.resonance * waves::sine(freq * 3.0, t)) / (1.0 + s.resonance)
    },
    |_, freq, t, rng| {
        let noise = white(rng);
        0.6 * waves::sine(freq + noise * 50.0, t) + 0.4 * noise
    },
];

const MODULATIONS: [ModulationFn; 4] = [
    |osc, _, _| osc,
    |osc, t, _| osc * (1.0 + 0.3 * waves::sine(60.0, t)),
    // unstable
    |osc, _, rng| {
        if rng.gen::<f64>() < 0.1 {
            osc * (0.7 + rng.gen::<f64>() * 0.6)
        } else {
            osc
        }
    },
    // occasional arcs
    |osc, _, rng| {
        if rng.gen::<f64>() < 0.03 {
            osc * 1.8
        } else {
            osc
        }
    },
];

/// `(setup, sample, freq, t)`
const EFFECTS: [EffectFn; 4] = [
    |_, x, _, _| x,
    |_, x, freq, t| x * (1.0 + 0.3 * waves::sine(freq * 2.0, t)),
    |s, x, _, _| (x * (1.5 + s.noise_factor)).tanh(),
    |s, x, _, _| quantize(x, s.bit_depth),
];

/// Plasma generator (weapon type 2).
#[derive(Debug, Clone, Copy, Default)]
pub struct Plasma;

impl Generator for Plasma {
    fn name(&self) -> &'static str {
        "plasma"
    }

    fn synthesize(&self, voice: &Voice, rng: &mut Pcg32) -> SampleBuffer {
        let setup = Setup::new(voice);
        let envelope = ENVELOPES[voice.envelope];
        let oscillator = OSCILLATORS[voice.oscillator];
        let modulation = MODULATIONS[voice.modulation];
        let effect = EFFECTS[voice.effect];

        let mut out = SampleBuffer::silent(NOMINAL_LEN);
        for (i, slot) in out.iter_mut().enumerate() {
            let t = time_at(i);
            if t > setup.duration {
                // buffer was created silent
                continue;
            }

            let env = attack_ramp(t, setup.attack).unwrap_or_else(|| {
                let nt = (t - setup.attack) / (setup.duration - setup.attack);
                envelope(nt, t, rng)
            });

            // 5 cycles of vibrato across the audible length
            let time_ratio = (t / setup.duration).min(1.0);
            let freq = setup.base_freq * (1.0 + waves::sine(5.0, time_ratio) * 0.2);

            let osc = modulation(oscillator(&setup, freq, t, rng), t, rng);

            let bed = white(rng) * (0.7 + 0.3 * waves::sine(2000.0, t)) * env * setup.noise_factor;
            let sample = (osc * (1.0 - setup.noise_factor * 0.5) + bed) * env;

            *slot = effect(&setup, sample, freq, t).clamp(-1.0, 1.0) as f32;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::time_at;
    use crate::rng::create_rng;
    use bitgun_seed::ParameterVector;

    #[test]
    fn test_duration_range() {
        assert!((plasma_duration(0.0) - 0.42).abs() < 1e-12);
        assert!((plasma_duration(1.0) - 0.78).abs() < 1e-12);
    }

    #[test]
    fn test_silent_after_duration() {
        for decay in [0.0, 0.25, 0.5] {
            let voice = Voice {
                params: ParameterVector::new(0.6, decay, 0.9, 0.4),
                envelope: 3,
                oscillator: 3,
                modulation: 3,
                effect: 2,
            };
            let out = Plasma.synthesize(&voice, &mut create_rng(17));
            assert_eq!(out.len(), NOMINAL_LEN);
            let end = plasma_duration(decay);
            for (i, s) in out.iter().enumerate() {
                if time_at(i) > end {
                    assert_eq!(*s, 0.0, "sample {i} after {end}s");
                }
            }
            assert!(out.iter().any(|s| *s != 0.0));
        }
    }
}
