//! Random source selection for commands that draw randomness.

use bitgun_seed::OsRandom;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// OS entropy by default, or a PCG32 stream when `--rng-seed` is given.
#[derive(Debug, Clone)]
pub enum CliRng {
    Os(OsRandom),
    Seeded(Pcg32),
}

impl CliRng {
    pub fn new(rng_seed: Option<u64>) -> Self {
        match rng_seed {
            Some(seed) => CliRng::Seeded(Pcg32::seed_from_u64(seed)),
            None => CliRng::Os(OsRandom),
        }
    }
}

impl RngCore for CliRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            CliRng::Os(rng) => rng.next_u32(),
            CliRng::Seeded(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            CliRng::Os(rng) => rng.next_u64(),
            CliRng::Seeded(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            CliRng::Os(rng) => rng.fill_bytes(dest),
            CliRng::Seeded(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            CliRng::Os(rng) => rng.try_fill_bytes(dest),
            CliRng::Seeded(rng) => rng.try_fill_bytes(dest),
        }
    }
}
