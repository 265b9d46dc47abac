//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the synthesis backend flows through this module. A render
//! gets one base seed; each stochastic stage derives its own stream from it by
//! name so that adding draws in one stage never shifts another.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Truncates a BLAKE3 hash of `input` to a little-endian u32.
fn hash_to_u32(input: &[u8]) -> u32 {
    let hash = blake3::hash(input);
    let b = hash.as_bytes();
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Derives a seed for a named component from the base seed.
///
/// # Arguments
/// * `base_seed` - The render's base seed
/// * `key` - Component name (e.g. "glitch", "repeat")
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    hash_to_u32(&input)
}

/// Derives a base seed from arbitrary text, such as a cache key.
pub fn derive_text_seed(text: &str) -> u32 {
    hash_to_u32(text.as_bytes())
}

/// Creates an RNG for a named component.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}

/// Draws a base seed from the operating system.
pub fn entropy_seed() -> u32 {
    rand::rngs::OsRng.next_u32()
}
