//! Hex seed handling.
//!
//! A seed is 1-8 hexadecimal characters. Its canonical form is always exactly
//! eight uppercase hex digits, i.e. four bytes.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{SeedError, SeedResult};
use crate::random::RandomSource;

/// Length of a canonical seed in hex characters.
pub const SEED_LEN: usize = 8;

/// Canonical seed for non-text input.
pub const ZERO_SEED: &str = "00000000";

const SEED_PATTERN: &str = r"^[0-9A-Fa-f]{1,8}$";

static SEED_REGEX: OnceLock<Regex> = OnceLock::new();

fn seed_regex() -> &'static Regex {
    SEED_REGEX.get_or_init(|| Regex::new(SEED_PATTERN).expect("invalid regex pattern"))
}

/// Draws four random bytes from `rng` and returns them as an 8-char uppercase seed.
///
/// # Errors
/// [`SeedError::Entropy`] when the source cannot produce bytes.
pub fn generate_seed(rng: &mut impl RandomSource) -> SeedResult<String> {
    Ok(Seed::random(rng)?.to_string())
}

/// Normalizes seed text to its canonical 8-character form.
///
/// Uppercases, right-pads with `'0'`, and truncates to eight characters.
/// Characters that are not hex digits become `'0'`, so the result always
/// matches `^[0-9A-F]{8}$`. This never fails; use [`validate_seed`] to reject
/// bad input.
pub fn normalize_seed(seed: &str) -> String {
    let mut out: String = seed
        .chars()
        .take(SEED_LEN)
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_hexdigit() {
                c
            } else {
                '0'
            }
        })
        .collect();
    while out.len() < SEED_LEN {
        out.push('0');
    }
    out
}

/// Normalizes an untyped value. Anything but a JSON string maps to [`ZERO_SEED`].
pub fn normalize_seed_value(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => normalize_seed(s),
        None => ZERO_SEED.to_string(),
    }
}

/// Returns true iff `seed` is 1-8 hex characters (case-insensitive).
pub fn validate_seed(seed: &str) -> bool {
    seed_regex().is_match(seed)
}

/// Extracts `num_bits` bits starting at `start_bit` (MSB-first) from the
/// 32-bit expansion of the normalized seed.
///
/// Bits past the end of the seed are ignored; an empty extraction yields 0.
pub fn get_bits_from_seed(seed: &str, start_bit: usize, num_bits: usize) -> u32 {
    let word = Seed::normalized(seed).as_u32() as u64;
    let start = start_bit.min(32);
    let end = start_bit.saturating_add(num_bits).min(32);
    if end <= start {
        return 0;
    }
    let width = end - start;
    let shifted = word >> (32 - end);
    (shifted & ((1u64 << width) - 1)) as u32
}

/// Reads `length` hex characters starting at `start_hex_char` and normalizes
/// them to `[0, 1]` by dividing by `16^length - 1`.
///
/// The window is clipped to the seed; the divisor always uses the requested
/// length. An empty window reads as 0.
pub fn get_value_from_seed_range(seed: &str, start_hex_char: usize, length: usize) -> f64 {
    let length = length.clamp(1, SEED_LEN);
    let hex = normalize_seed(seed);
    let start = start_hex_char.min(SEED_LEN);
    let end = (start + length).min(SEED_LEN);
    let portion = u64::from_str_radix(&hex[start..end], 16).unwrap_or(0);
    let max_value = (1u64 << (4 * length)) - 1;
    portion as f64 / max_value as f64
}

/// A canonical seed: four bytes, displayed as eight uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed([u8; 4]);

impl Seed {
    /// Builds a seed from raw bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Normalizes any text into a seed (see [`normalize_seed`]).
    pub fn normalized(seed: &str) -> Self {
        let hex = normalize_seed(seed);
        let word = u32::from_str_radix(&hex, 16).unwrap_or(0);
        Self(word.to_be_bytes())
    }

    /// Validates then normalizes seed text.
    pub fn parse(seed: &str) -> SeedResult<Self> {
        if !validate_seed(seed) {
            return Err(SeedError::invalid_seed(seed));
        }
        Ok(Self::normalized(seed))
    }

    /// Draws a random seed.
    pub fn random(rng: &mut impl RandomSource) -> SeedResult<Self> {
        let mut bytes = [0u8; 4];
        rng.try_fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// The four seed bytes, most significant first.
    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// The seed as a big-endian 32-bit word.
    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.as_u32())
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Seed {
    type Error = SeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn is_canonical(s: &str) -> bool {
        s.len() == 8 && s.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    }

    #[test]
    fn test_generate_seed_is_canonical() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let seed = generate_seed(&mut rng).unwrap();
            assert!(is_canonical(&seed), "{seed}");
        }
    }

    struct DeadSource;

    impl RandomSource for DeadSource {
        fn fill(&mut self, bytes: &mut [u8]) {
            bytes.fill(0);
        }

        fn try_fill(&mut self, _bytes: &mut [u8]) -> SeedResult<()> {
            Err(SeedError::Entropy {
                message: "no entropy".into(),
            })
        }
    }

    #[test]
    fn test_generate_seed_propagates_entropy_failure() {
        let err = generate_seed(&mut DeadSource).unwrap_err();
        assert_eq!(err.code(), "SEED_005");
        assert!(Seed::random(&mut DeadSource).is_err());
    }

    #[test]
    fn test_normalize_pads_and_uppercases() {
        assert_eq!(normalize_seed("ab"), "AB000000");
        assert_eq!(normalize_seed(""), "00000000");
        assert_eq!(normalize_seed("deadbeefcafe"), "DEADBEEF");
    }

    #[test]
    fn test_normalize_is_idempotent_and_total() {
        for input in ["", "a", "1234abcd", "zz", "ÄÖÜ", "  12", "ffffffffff", "g1h2"] {
            let once = normalize_seed(input);
            assert_eq!(normalize_seed(&once), once);
            assert!(is_canonical(&once), "{input:?} -> {once}");
        }
    }

    #[test]
    fn test_normalize_non_text() {
        assert_eq!(normalize_seed_value(&serde_json::json!(42)), ZERO_SEED);
        assert_eq!(normalize_seed_value(&serde_json::json!(null)), ZERO_SEED);
        assert_eq!(normalize_seed_value(&serde_json::json!("c0ffee")), "C0FFEE00");
    }

    #[test]
    fn test_validate_seed() {
        assert!(validate_seed("0"));
        assert!(validate_seed("deadBEEF"));
        assert!(!validate_seed(""));
        assert!(!validate_seed("123456789"));
        assert!(!validate_seed("12G4"));
        assert!(!validate_seed("12 4"));
    }

    #[test]
    fn test_get_bits_from_seed() {
        assert_eq!(get_bits_from_seed("FF000000", 0, 2), 3);
        assert_eq!(get_bits_from_seed("80000000", 0, 1), 1);
        assert_eq!(get_bits_from_seed("0000000F", 28, 4), 15);
        assert_eq!(get_bits_from_seed("DEADBEEF", 0, 32), 0xDEAD_BEEF);
        assert_eq!(get_bits_from_seed("FFFFFFFF", 32, 4), 0);
        assert_eq!(get_bits_from_seed("FFFFFFFF", 30, 8), 3);
        assert_eq!(get_bits_from_seed("FFFFFFFF", 4, 0), 0);
    }

    #[test]
    fn test_get_value_from_seed_range() {
        assert_eq!(get_value_from_seed_range("FF000000", 0, 2), 1.0);
        assert_eq!(get_value_from_seed_range("FF000000", 2, 2), 0.0);
        assert!((get_value_from_seed_range("80", 0, 1) - 8.0 / 15.0).abs() < 1e-12);
        assert_eq!(get_value_from_seed_range("00000000", 8, 2), 0.0);
    }

    #[test]
    fn test_seed_parse_and_display() {
        let seed: Seed = "c0ffee".parse().unwrap();
        assert_eq!(seed.to_string(), "C0FFEE00");
        assert_eq!(seed.bytes(), [0xC0, 0xFF, 0xEE, 0x00]);
        assert!("xyz".parse::<Seed>().is_err());
    }

    #[test]
    fn test_seed_serde_roundtrip() {
        let seed = Seed::from_bytes([1, 2, 3, 4]);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"01020304\"");
        let back: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seed);
    }
}
