//! Laser: a bright tone swept upward along `base + (1 - e^(-t*rate)) * range`.

use rand::Rng;
use rand_pcg::Pcg32;

use super::waves::{self, attack_ramp, quantize, white};
use super::{Generator, Voice};
use crate::buffer::{time_at, SampleBuffer, NOMINAL_LEN};

/// Exponential decay rate per envelope selector, after the attack.
const DECAY_RATES: [f64; 4] = [15.0, 10.0, 5.0, 3.0];

#[derive(Debug, Clone, Copy)]
struct Setup {
    base_freq: f64,
    freq_range: f64,
    sweep_rate: f64,
    attack: f64,
    decay_rate: f64,
    noise: f64,
}

impl Setup {
    fn new(voice: &Voice) -> Self {
        let p = &voice.params;
        Self {
            base_freq: 300.0 + p.frequency * 600.0,
            freq_range: 800.0 + p.decay * 1200.0,
            sweep_rate: 2.0 + p.noise * 8.0,
            attack: 0.01 + p.crush * 0.05,
            decay_rate: DECAY_RATES[voice.envelope],
            noise: p.noise,
        }
    }

    fn freq_at(&self, t: f64) -> f64 {
        self.base_freq + (1.0 - (-t * self.sweep_rate).exp()) * self.freq_range
    }
}

type OscillatorFn = fn(f64, f64) -> f64;
type ModulationFn = fn(f64, f64, &mut Pcg32) -> f64;
type EffectFn = fn(f64, f64, f64, f64) -> f64;

const OSCILLATORS: [OscillatorFn; 4] = [
    waves::sine,
    waves::triangle,
    waves::saw,
    // pulsed: sub-octave square under the sine
    |freq, t| waves::square(freq * 0.5, t) * 0.3 + waves::sine(freq, t) * 0.7,
];

const MODULATIONS: [ModulationFn; 4] = [
    |osc, _, _| osc,
    |osc, t, _| osc * (1.0 + 0.6 * waves::square(120.0, t)),
    |osc, t, _| osc * (1.0 + 0.3 * waves::sine(80.0, t)),
    |osc, _, rng| {
        if rng.gen::<f64>() < 0.05 {
            osc * (0.5 + rng.gen::<f64>())
        } else {
            osc
        }
    },
];

/// `(sample, freq, t, envelope)`
const EFFECTS: [EffectFn; 4] = [
    |x, _, _, _| x,
    |x, freq, t, _| x * (1.0 + 0.2 * waves::sine(freq * 0.1, t)),
    |x, _, _, _| quantize(x, 8.0) + x * 0.3,
    |x, freq, t, env| x + 0.2 * waves::sine(freq * 2.0, t) * env,
];

/// Laser generator (weapon type 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Laser;

impl Generator for Laser {
    fn name(&self) -> &'static str {
        "laser"
    }

    fn synthesize(&self, voice: &Voice, rng: &mut Pcg32) -> SampleBuffer {
        let setup = Setup::new(voice);
        let oscillator = OSCILLATORS[voice.oscillator];
        let modulation = MODULATIONS[voice.modulation];
        let effect = EFFECTS[voice.effect];

        let mut out = SampleBuffer::silent(NOMINAL_LEN);
        for (i, slot) in out.iter_mut().enumerate() {
            let t = time_at(i);
            let env = attack_ramp(t, setup.attack)
                .unwrap_or_else(|| (-(t - setup.attack) * setup.decay_rate).exp());

            let freq = setup.freq_at(t);
            let osc = modulation(oscillator(freq, t), t, rng);

            // texture only
            let noise = white(rng) * 0.1 * setup.noise;
            let sample = (osc * 0.9 + noise * 0.1) * env;

            *slot = effect(sample, freq, t, env).clamp(-1.0, 1.0) as f32;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use bitgun_seed::ParameterVector;

    #[test]
    fn test_sweep_rises_toward_ceiling() {
        let voice = Voice {
            params: ParameterVector::new(0.5, 0.5, 0.5, 0.5),
            envelope: 0,
            oscillator: 0,
            modulation: 0,
            effect: 0,
        };
        let setup = Setup::new(&voice);
        assert_eq!(setup.freq_at(0.0), 600.0);
        assert!(setup.freq_at(0.1) < setup.freq_at(0.3));
        assert!(setup.freq_at(10.0) <= 600.0 + 1400.0);
    }

    #[test]
    fn test_attack_ramp_length() {
        let voice = Voice {
            params: ParameterVector::new(0.0, 0.0, 0.0, 1.0),
            envelope: 3,
            oscillator: 0,
            modulation: 0,
            effect: 0,
        };
        assert!((Setup::new(&voice).attack - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_clean_sine_without_noise_is_deterministic() {
        // noise = 0 removes every random term
        let voice = Voice {
            params: ParameterVector::new(0.2, 0.4, 0.0, 0.3),
            envelope: 1,
            oscillator: 0,
            modulation: 2,
            effect: 3,
        };
        let a = Laser.synthesize(&voice, &mut create_rng(1));
        let b = Laser.synthesize(&voice, &mut create_rng(2));
        assert_eq!(a, b);
    }
}
