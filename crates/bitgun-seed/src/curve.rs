//! Response curves for shaping seed bytes into parameters.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeedError;

/// Clamps a value to `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Response curve applied to a normalized seed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    /// Identity.
    #[default]
    Linear,
    /// `v^(1+strength)`.
    Exp,
    /// `v^(1/(1+strength))`.
    Log,
    /// `sin(v*pi/2)`.
    Sin,
    /// `1 - cos(v*pi/2)`.
    Cos,
    /// Smoothstep.
    Smooth,
    /// Smootherstep.
    Smoother,
    /// Threshold at 0.5.
    Binary,
    /// Quantized to `max(2, floor(strength*10))` levels.
    Steps,
}

impl Curve {
    /// All curves, in declaration order.
    pub const ALL: [Curve; 9] = [
        Curve::Linear,
        Curve::Exp,
        Curve::Log,
        Curve::Sin,
        Curve::Cos,
        Curve::Smooth,
        Curve::Smoother,
        Curve::Binary,
        Curve::Steps,
    ];

    /// Returns the curve's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::Exp => "exp",
            Curve::Log => "log",
            Curve::Sin => "sin",
            Curve::Cos => "cos",
            Curve::Smooth => "smooth",
            Curve::Smoother => "smoother",
            Curve::Binary => "binary",
            Curve::Steps => "steps",
        }
    }

    /// Returns true for the continuous curves that map 0 to 0 and 1 to 1.
    pub fn is_continuous(&self) -> bool {
        !matches!(self, Curve::Binary | Curve::Steps)
    }

    /// Applies the curve. `value` is clamped to `[0, 1]` first.
    ///
    /// The result is not clamped: `Steps` can exceed 1 at `value == 1`.
    pub fn apply(&self, value: f64, strength: f64) -> f64 {
        let v = clamp01(value);
        match self {
            Curve::Linear => v,
            Curve::Exp => v.powf(1.0 + strength),
            Curve::Log => v.powf(1.0 / (1.0 + strength)),
            Curve::Sin => (v * PI / 2.0).sin(),
            Curve::Cos => 1.0 - (v * PI / 2.0).cos(),
            Curve::Smooth => v * v * (3.0 - 2.0 * v),
            Curve::Smoother => v * v * v * (v * (v * 6.0 - 15.0) + 10.0),
            Curve::Binary => {
                if v >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Curve::Steps => {
                let steps = (strength * 10.0).floor().max(2.0);
                (v * steps).floor() / (steps - 1.0)
            }
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Curve {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Curve::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeedError::UnknownCurve { name: s.to_string() })
    }
}

/// Applies `curve` with `strength` to `value`.
pub fn apply_curve(value: f64, curve: Curve, strength: f64) -> f64 {
    curve.apply(value, strength)
}

/// Adds a sinusoidal wobble to a `[0, 1]` value and clamps the result.
///
/// Defaults in the codec are `frequency = 4`, `amplitude = 0.5`.
pub fn create_oscillation(value: f64, frequency: f64, amplitude: f64) -> f64 {
    let base = clamp01(value);
    clamp01(base + (base * PI * 2.0 * frequency).sin() * amplitude * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRENGTHS: [f64; 4] = [0.0, 0.5, 1.0, 3.0];

    #[test]
    fn test_continuous_curves_fix_endpoints() {
        for curve in Curve::ALL.into_iter().filter(Curve::is_continuous) {
            for s in STRENGTHS {
                assert!(curve.apply(0.0, s).abs() < 1e-12, "{curve} at 0");
                assert!((curve.apply(1.0, s) - 1.0).abs() < 1e-12, "{curve} at 1");
            }
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in Curve::ALL {
            for s in STRENGTHS {
                let mut prev = f64::NEG_INFINITY;
                for i in 0..=1000 {
                    let y = curve.apply(i as f64 / 1000.0, s);
                    assert!(y >= prev - 1e-12, "{curve} strength {s} at {i}");
                    prev = y;
                }
            }
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(apply_curve(-2.0, Curve::Linear, 1.0), 0.0);
        assert_eq!(apply_curve(7.0, Curve::Linear, 1.0), 1.0);
    }

    #[test]
    fn test_specific_values() {
        assert!((apply_curve(0.5, Curve::Exp, 1.0) - 0.25).abs() < 1e-12);
        assert!((apply_curve(0.25, Curve::Log, 1.0) - 0.5).abs() < 1e-12);
        assert_eq!(apply_curve(0.5, Curve::Smooth, 1.0), 0.5);
        assert_eq!(apply_curve(0.49, Curve::Binary, 1.0), 0.0);
        assert_eq!(apply_curve(0.5, Curve::Binary, 1.0), 1.0);
        // strength 0.3 → 3 steps
        assert_eq!(apply_curve(0.5, Curve::Steps, 0.3), 0.5);
        // strength below 0.2 still uses 2 steps
        assert_eq!(apply_curve(0.75, Curve::Steps, 0.0), 1.0);
    }

    #[test]
    fn test_curve_parse() {
        assert_eq!("SMOOTHER".parse::<Curve>().unwrap(), Curve::Smoother);
        assert!("cubic".parse::<Curve>().is_err());
        let json = serde_json::to_string(&Curve::Steps).unwrap();
        assert_eq!(json, "\"steps\"");
    }

    #[test]
    fn test_create_oscillation_stays_in_range() {
        for i in 0..=100 {
            let v = create_oscillation(i as f64 / 100.0, 4.0, 0.5);
            assert!((0.0..=1.0).contains(&v));
        }
        // sin(0) and sin(2*pi*4) vanish at the endpoints
        assert_eq!(create_oscillation(0.0, 4.0, 0.5), 0.0);
        assert!((create_oscillation(1.0, 4.0, 0.5) - 1.0).abs() < 1e-9);
    }
}
