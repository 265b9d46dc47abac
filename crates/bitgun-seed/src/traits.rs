//! Categorical trait selectors packed into the first two seed bytes.
//!
//! Byte 0 holds weapon, envelope, oscillator, and modulation selectors; byte 1
//! holds effect, pitch bend, repeat, and harmonics. Each field is two bits,
//! most significant first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SeedError, SeedResult};
use crate::params::{seed_to_numbers, ParameterVector, SeedOptions};
use crate::random::RandomSource;
use crate::seed::Seed;

/// Synthesis algorithm selected by the weapon selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    /// Low square/saw gunshot.
    Classic,
    /// Rising sci-fi sweep.
    Laser,
    /// Vibrato hum with a noise bed.
    Plasma,
    /// Randomly perturbed digital tones.
    Glitch,
}

impl WeaponType {
    /// Maps a selector (masked to two bits) to a weapon type.
    pub fn from_selector(value: u8) -> Self {
        match value & 0x03 {
            0 => WeaponType::Classic,
            1 => WeaponType::Laser,
            2 => WeaponType::Plasma,
            _ => WeaponType::Glitch,
        }
    }

    /// Returns the weapon type's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Classic => "classic",
            WeaponType::Laser => "laser",
            WeaponType::Plasma => "plasma",
            WeaponType::Glitch => "glitch",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eight two-bit selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitSelectors {
    /// Generator choice (see [`WeaponType`]).
    pub weapon_type: u8,
    /// Envelope shape.
    pub envelope_type: u8,
    /// Oscillator waveform.
    pub oscillator_type: u8,
    /// Per-sample modulation variant.
    pub modulation_type: u8,
    /// Per-sample effect variant.
    pub effect_type: u8,
    /// Pitch bend curve (0 = none).
    pub pitch_bend_type: u8,
    /// Repeat layout (0 = none).
    pub repeat_type: u8,
    /// Harmonic blend (0 = none).
    pub harmonics_type: u8,
}

impl TraitSelectors {
    /// Field names, in packing order.
    pub const FIELDS: [&'static str; 8] = [
        "weaponType",
        "envelopeType",
        "oscillatorType",
        "modulationType",
        "effectType",
        "pitchBendType",
        "repeatType",
        "harmonicsType",
    ];

    /// Decodes selectors from the two leading seed bytes.
    pub fn decode(b0: u8, b1: u8) -> Self {
        Self {
            weapon_type: (b0 >> 6) & 3,
            envelope_type: (b0 >> 4) & 3,
            oscillator_type: (b0 >> 2) & 3,
            modulation_type: b0 & 3,
            effect_type: (b1 >> 6) & 3,
            pitch_bend_type: (b1 >> 4) & 3,
            repeat_type: (b1 >> 2) & 3,
            harmonics_type: b1 & 3,
        }
    }

    /// Decodes selectors from a seed's raw bytes.
    pub fn from_seed(seed: &Seed) -> Self {
        let [b0, b1, _, _] = seed.bytes();
        Self::decode(b0, b1)
    }

    /// Packs selectors into two bytes, masking each field to two bits.
    pub fn encode(&self) -> [u8; 2] {
        let pack = |a: u8, b: u8, c: u8, d: u8| {
            ((a & 3) << 6) | ((b & 3) << 4) | ((c & 3) << 2) | (d & 3)
        };
        [
            pack(
                self.weapon_type,
                self.envelope_type,
                self.oscillator_type,
                self.modulation_type,
            ),
            pack(
                self.effect_type,
                self.pitch_bend_type,
                self.repeat_type,
                self.harmonics_type,
            ),
        ]
    }

    /// The packed selectors as a 16-bit word (byte 0 high).
    pub fn word(&self) -> u16 {
        u16::from_be_bytes(self.encode())
    }

    /// The weapon selector as a generator choice.
    pub fn weapon(&self) -> WeaponType {
        WeaponType::from_selector(self.weapon_type)
    }

    /// Selector values in packing order.
    pub fn to_array(&self) -> [u8; 8] {
        [
            self.weapon_type,
            self.envelope_type,
            self.oscillator_type,
            self.modulation_type,
            self.effect_type,
            self.pitch_bend_type,
            self.repeat_type,
            self.harmonics_type,
        ]
    }

    /// Builds selectors from values in packing order, rejecting anything above 3.
    pub fn try_from_array(values: [u32; 8]) -> SeedResult<Self> {
        for (name, &value) in Self::FIELDS.iter().zip(values.iter()) {
            if value > 3 {
                return Err(SeedError::SelectorOutOfRange { name: *name, value });
            }
        }
        let v = values.map(|x| x as u8);
        Ok(Self {
            weapon_type: v[0],
            envelope_type: v[1],
            oscillator_type: v[2],
            modulation_type: v[3],
            effect_type: v[4],
            pitch_bend_type: v[5],
            repeat_type: v[6],
            harmonics_type: v[7],
        })
    }
}

/// Selectors plus the parameter vector of a seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Categorical selectors, decoded from the raw seed bytes.
    #[serde(flatten)]
    pub traits: TraitSelectors,
    /// Continuous parameters.
    pub params: ParameterVector,
}

/// Decodes features with the default (linear) seed options.
pub fn extract_features(seed: &str) -> Features {
    extract_features_with(seed, &SeedOptions::default())
}

/// Decodes features, shaping the parameters with `options`.
///
/// Selectors always come from the raw bytes; `options` affects only `params`.
pub fn extract_features_with(seed: &str, options: &SeedOptions) -> Features {
    let canonical = Seed::normalized(seed);
    Features {
        traits: TraitSelectors::from_seed(&canonical),
        params: seed_to_numbers(&canonical.to_string(), options),
    }
}

/// A partial selector set. Missing fields are drawn at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureRequest {
    /// Weapon generator (byte 0, bits 7-6).
    pub weapon_type: Option<u8>,
    /// Envelope shape (byte 0, bits 5-4).
    pub envelope_type: Option<u8>,
    /// Oscillator waveform (byte 0, bits 3-2).
    pub oscillator_type: Option<u8>,
    /// Modulation variant (byte 0, bits 1-0).
    pub modulation_type: Option<u8>,
    /// Per-sample effect (byte 1, bits 7-6).
    pub effect_type: Option<u8>,
    /// Pitch bend curve (byte 1, bits 5-4).
    pub pitch_bend_type: Option<u8>,
    /// Repeat layout (byte 1, bits 3-2).
    pub repeat_type: Option<u8>,
    /// Harmonic blend (byte 1, bits 1-0).
    pub harmonics_type: Option<u8>,
}

impl FeatureRequest {
    /// Fills missing selectors from `rng`.
    pub fn resolve(&self, rng: &mut impl RandomSource) -> TraitSelectors {
        let mut pick = |v: Option<u8>| v.unwrap_or_else(|| rng.below(4) as u8);
        TraitSelectors {
            weapon_type: pick(self.weapon_type),
            envelope_type: pick(self.envelope_type),
            oscillator_type: pick(self.oscillator_type),
            modulation_type: pick(self.modulation_type),
            effect_type: pick(self.effect_type),
            pitch_bend_type: pick(self.pitch_bend_type),
            repeat_type: pick(self.repeat_type),
            harmonics_type: pick(self.harmonics_type),
        }
    }
}

impl From<TraitSelectors> for FeatureRequest {
    fn from(t: TraitSelectors) -> Self {
        Self {
            weapon_type: Some(t.weapon_type),
            envelope_type: Some(t.envelope_type),
            oscillator_type: Some(t.oscillator_type),
            modulation_type: Some(t.modulation_type),
            effect_type: Some(t.effect_type),
            pitch_bend_type: Some(t.pitch_bend_type),
            repeat_type: Some(t.repeat_type),
            harmonics_type: Some(t.harmonics_type),
        }
    }
}

/// Builds a seed whose first two bytes encode `request` (random fields where
/// missing) and whose last two bytes are random.
pub fn create_seed_with_features(request: &FeatureRequest, rng: &mut impl RandomSource) -> String {
    let traits = request.resolve(rng);
    let [b0, b1] = traits.encode();
    let b2 = rng.next_u8();
    let b3 = rng.next_u8();
    Seed::from_bytes([b0, b1, b2, b3]).to_string()
}
