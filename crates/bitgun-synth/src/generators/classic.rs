//! Classic gunshot: a low square/saw body with a fast downward sweep.

use rand::Rng;
use rand_pcg::Pcg32;

use super::waves::{self, attack_ramp, quantize, sign, white};
use super::{Generator, Voice};
use crate::buffer::{time_at, SampleBuffer, NOMINAL_LEN};

const ATTACK: f64 = 0.002;

/// `(offset, span)` of the decay rate per envelope selector: fast, medium, slow, very slow.
const DECAY_RATES: [(f64, f64); 4] = [(9.0, 6.0), (5.0, 6.0), (3.0, 4.0), (2.0, 3.0)];

/// Constants derived once per render.
#[derive(Debug, Clone, Copy)]
struct Setup {
    base_freq: f64,
    decay_rate: f64,
    noise_amount: f64,
    bit_depth: f64,
}

impl Setup {
    fn new(voice: &Voice) -> Self {
        let p = &voice.params;
        let (offset, span) = DECAY_RATES[voice.envelope];
        let bit_crush_factor = 2.0 + p.crush * 12.0;
        Self {
            base_freq: 60.0 + p.frequency * 140.0,
            decay_rate: offset + p.decay * span,
            noise_amount: 0.2 + p.noise * 0.8,
            bit_depth: 2f64.powf(bit_crush_factor.floor()),
        }
    }
}

type EnvelopeFn = fn(&Setup, f64) -> f64;
type OscillatorFn = fn(f64, f64) -> f64;
type ModulationFn = fn(f64, f64, f64, &mut Pcg32) -> f64;
type EffectFn = fn(&Setup, f64) -> f64;

/// Decay shapes over time since the attack ended.
const ENVELOPES: [EnvelopeFn; 4] = [
    |s, dt| (-s.decay_rate * dt).exp(),
    |s, dt| (1.0 - dt * s.decay_rate * 0.5).max(0.0),
    |s, dt| 1.0 / (1.0 + s.decay_rate * dt),
    |s, dt| (1.0 - dt).powf(s.decay_rate * 0.2),
];

const OSCILLATORS: [OscillatorFn; 4] = [
    waves::square,
    waves::saw,
    waves::triangle,
    |freq, t| waves::square(freq, t) * 0.6 + waves::saw(freq, t) * 0.4,
];

const MODULATIONS: [ModulationFn; 4] = [
    |osc, _, _, _| osc,
    // 60 Hz tremolo
    |osc, _, t, _| osc * (1.0 + 0.3 * waves::sine(60.0, t)),
    |osc, freq, t, _| osc + 0.3 * waves::sine(freq * 1.5, t),
    |osc, _, _, rng| osc * (1.0 + 0.3 * (rng.gen::<f64>() - 0.5)),
];

const EFFECTS: [EffectFn; 4] = [
    |s, x| quantize(x, s.bit_depth),
    |_, x| (x * 3.0).tanh(),
    |_, x| sign(x) * x.abs().powf(0.8),
    |s, x| (quantize(x, s.bit_depth) * 2.5).tanh(),
];

/// Classic gunshot generator (weapon type 0).
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl Generator for Classic {
    fn name(&self) -> &'static str {
        "classic"
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
            let env = attack_ramp(t, ATTACK).unwrap_or_else(|| envelope(&setup, t - ATTACK));

            // 3x the base pitch at t=0, settling by 125 ms
            let freq_mod = 1.0 + (1.0 - (t * 8.0).min(1.0)) * 2.0;
            let freq = setup.base_freq * freq_mod;

            let osc = modulation(oscillator(freq, t), freq, t, rng);
            let noise = white(rng) * setup.noise_amount;
            let sample = (osc * (1.0 - setup.noise_amount * 0.7) + noise) * env;

            *slot = effect(&setup, sample).clamp(-1.0, 1.0) as f32;
        }
        out
    }
}
