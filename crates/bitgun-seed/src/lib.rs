//! Bitgun Seed Codec
//!
//! Converts between compact hex seeds, the continuous [`ParameterVector`] that
//! drives synthesis, and the eight categorical [`TraitSelectors`] that pick
//! synthesis variants.
//!
//! # Overview
//!
//! A seed is four bytes written as eight hex digits:
//!
//! - **Bytes 0-3** each map to one parameter (`frequency`, `decay`, `noise`,
//!   `crush`) through an optional response [`Curve`].
//! - **Bytes 0-1** also pack the eight two-bit selectors. Selectors are always
//!   decoded from the raw bytes, never from the shaped parameters.
//!
//! # Example
//!
//! ```
//! use bitgun_seed::{extract_features, parameters_to_seed, seed_to_numbers, SeedOptions};
//!
//! let params = seed_to_numbers("4A10C0FF", &SeedOptions::default());
//! assert_eq!(parameters_to_seed(&params), "4A10C0FF");
//!
//! let features = extract_features("4A10C0FF");
//! assert_eq!(features.traits.weapon_type, 1);
//! ```
//!
//! # Randomness
//!
//! Seed generation, mutation, and feature composition draw from an injected
//! [`RandomSource`]. Pass [`OsRandom`] for production use or a seeded PCG
//! stream for reproducible results.

pub mod curve;
pub mod error;
pub mod params;
pub mod random;
pub mod seed;
pub mod traits;
pub mod variation;

pub use curve::{apply_curve, clamp01, create_oscillation, Curve};
pub use error::{SeedError, SeedResult};
pub use params::{
    calculate_seed_similarity, parameters_to_seed, seed_bytes_to_numbers, seed_to_numbers,
    ParameterVector, SeedOptions,
};
pub use random::{OsRandom, RandomSource};
pub use seed::{
    generate_seed, get_bits_from_seed, get_value_from_seed_range, normalize_seed,
    normalize_seed_value, validate_seed, Seed, SEED_LEN, ZERO_SEED,
};
pub use traits::{
    create_seed_with_features, extract_features, extract_features_with, FeatureRequest, Features,
    TraitSelectors, WeaponType,
};
pub use variation::{
    create_related_seed, generate_seed_sequence, get_random_variation, Distribution, SeedSequence,
    SeedWalk, VariationOptions, DEFAULT_CHANGE_AMOUNT,
};
