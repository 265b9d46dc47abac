//! Continuous parameter vector derived from seed bytes.

use serde::{Deserialize, Serialize};

use crate::curve::{clamp01, Curve};
use crate::seed::Seed;

/// Sound parameters, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterVector {
    /// Base pitch control.
    pub frequency: f64,
    /// Decay / duration control.
    pub decay: f64,
    /// Noise amount control.
    pub noise: f64,
    /// Bit-crush / filter control.
    pub crush: f64,
}

impl ParameterVector {
    /// Creates a vector, clamping every field to `[0, 1]`.
    pub fn new(frequency: f64, decay: f64, noise: f64, crush: f64) -> Self {
        Self {
            frequency,
            decay,
            noise,
            crush,
        }
        .clamped()
    }

    /// Returns a copy with every field clamped to `[0, 1]`.
    pub fn clamped(&self) -> Self {
        Self {
            frequency: clamp01(self.frequency),
            decay: clamp01(self.decay),
            noise: clamp01(self.noise),
            crush: clamp01(self.crush),
        }
    }

    /// Fields in seed byte order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.frequency, self.decay, self.noise, self.crush]
    }

    /// Builds a vector from fields in seed byte order, clamping each.
    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Euclidean distance in `[0,1]^4`.
    pub fn distance(&self, other: &ParameterVector) -> f64 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Options for [`seed_to_numbers`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOptions {
    /// Response curve applied to each byte.
    pub curve: Curve,
    /// Curve strength (used by `exp`, `log`, and `steps`).
    pub strength: f64,
    /// Added to `frequency` after the curve.
    pub frequency_bias: f64,
    /// Added to `decay` after the curve.
    pub decay_bias: f64,
    /// Added to `noise` after the curve.
    pub noise_bias: f64,
    /// Added to `crush` after the curve.
    pub crush_bias: f64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            curve: Curve::Linear,
            strength: 1.0,
            frequency_bias: 0.0,
            decay_bias: 0.0,
            noise_bias: 0.0,
            crush_bias: 0.0,
        }
    }
}

impl SeedOptions {
    /// Options with the given curve and strength and no bias.
    pub fn with_curve(curve: Curve, strength: f64) -> Self {
        Self {
            curve,
            strength,
            ..Self::default()
        }
    }

    fn biases(&self) -> [f64; 4] {
        [
            self.frequency_bias,
            self.decay_bias,
            self.noise_bias,
            self.crush_bias,
        ]
    }
}

/// Decodes the parameter vector from a seed's four bytes.
///
/// Each byte is normalized (`byte / 255`), shaped by the curve, biased, and
/// clamped to `[0, 1]`.
pub fn seed_to_numbers(seed: &str, options: &SeedOptions) -> ParameterVector {
    seed_bytes_to_numbers(Seed::normalized(seed).bytes(), options)
}

/// [`seed_to_numbers`] over raw bytes.
pub fn seed_bytes_to_numbers(bytes: [u8; 4], options: &SeedOptions) -> ParameterVector {
    let biases = options.biases();
    let mut values = [0.0; 4];
    for (i, value) in values.iter_mut().enumerate() {
        let shaped = options.curve.apply(bytes[i] as f64 / 255.0, options.strength);
        *value = clamp01(shaped + biases[i]);
    }
    ParameterVector {
        frequency: values[0],
        decay: values[1],
        noise: values[2],
        crush: values[3],
    }
}

/// Encodes a parameter vector back into a seed (`round(clamp01(v) * 255)` per byte).
///
/// Exact inverse of [`seed_to_numbers`] only under the linear curve with no bias.
pub fn parameters_to_seed(params: &ParameterVector) -> String {
    let mut bytes = [0u8; 4];
    for (byte, value) in bytes.iter_mut().zip(params.to_array()) {
        *byte = (clamp01(value) * 255.0).round() as u8;
    }
    Seed::from_bytes(bytes).to_string()
}

/// Similarity of two seeds: `max(0, 1 - distance)` between their linear parameter vectors.
pub fn calculate_seed_similarity(seed_a: &str, seed_b: &str) -> f64 {
    let options = SeedOptions::default();
    let a = seed_to_numbers(seed_a, &options);
    let b = seed_to_numbers(seed_b, &options);
    (1.0 - a.distance(&b)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_seed_decodes_to_zero() {
        assert_eq!(
            seed_to_numbers("00000000", &SeedOptions::default()),
            ParameterVector::default()
        );
    }

    #[test]
    fn test_linear_roundtrip_every_byte() {
        let options = SeedOptions::with_curve(Curve::Linear, 3.7);
        for b in 0..=255u8 {
            let seed = format!("{b:02X}{:02X}{b:02X}{:02X}", 255 - b, b / 2);
            let params = seed_to_numbers(&seed, &options);
            assert_eq!(parameters_to_seed(&params), seed);
        }
    }

    #[test]
    fn test_bias_is_clamped() {
        let options = SeedOptions {
            frequency_bias: 2.0,
            crush_bias: -2.0,
            ..SeedOptions::default()
        };
        let params = seed_to_numbers("80808080", &options);
        assert_eq!(params.frequency, 1.0);
        assert_eq!(params.crush, 0.0);
        assert!((params.decay - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_curve_changes_params() {
        let linear = seed_to_numbers("80808080", &SeedOptions::default());
        let exp = seed_to_numbers("80808080", &SeedOptions::with_curve(Curve::Exp, 1.0));
        assert!(exp.frequency < linear.frequency);
    }

    #[test]
    fn test_parameters_to_seed_clamps() {
        let params = ParameterVector {
            frequency: 1.5,
            decay: -0.5,
            noise: 0.5,
            crush: 1.0,
        };
        assert_eq!(parameters_to_seed(&params), "FF0080FF");
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(calculate_seed_similarity("1234ABCD", "1234abcd"), 1.0);
        assert_eq!(calculate_seed_similarity("00000000", "FFFFFFFF"), 0.0);
        let s = calculate_seed_similarity("80808080", "90808080");
        assert!(s > 0.9 && s < 1.0);
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: SeedOptions = serde_json::from_str(r#"{"curve":"sin"}"#).unwrap();
        assert_eq!(options.curve, Curve::Sin);
        assert_eq!(options.strength, 1.0);
    }
}
