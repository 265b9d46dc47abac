//! Random byte capability.
//!
//! Everything in the codec that needs randomness takes a [`RandomSource`]
//! instead of reaching for a global generator, so callers can inject a
//! seeded PCG stream in tests and the OS generator in production.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{SeedError, SeedResult};

/// A source of random bytes.
pub trait RandomSource {
    /// Fills `bytes` with random data.
    fn fill(&mut self, bytes: &mut [u8]);

    /// Fills `bytes`, reporting a source failure as [`SeedError::Entropy`].
    fn try_fill(&mut self, bytes: &mut [u8]) -> SeedResult<()> {
        self.fill(bytes);
        Ok(())
    }

    /// Returns a uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        self.fill(&mut buf);
        // 53 mantissa bits
        (u64::from_le_bytes(buf) >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Returns a uniform random byte.
    fn next_u8(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        self.fill(&mut buf);
        buf[0]
    }

    /// Returns a uniform integer in `0..n` (`n` must be non-zero).
    fn below(&mut self, n: u32) -> u32 {
        (self.next_f64() * n as f64) as u32 % n
    }
}

impl<R: RngCore> RandomSource for R {
    fn fill(&mut self, bytes: &mut [u8]) {
        self.fill_bytes(bytes);
    }

    fn try_fill(&mut self, bytes: &mut [u8]) -> SeedResult<()> {
        self.try_fill_bytes(bytes).map_err(|err| SeedError::Entropy {
            message: err.to_string(),
        })
    }
}

/// Cryptographically secure source backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RngCore for OsRandom {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(rng.below(4) < 4);
        }
    }

    struct Unplugged;

    impl RngCore for Unplugged {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("device unavailable"))
        }
    }

    #[test]
    fn test_try_fill_reports_source_failure() {
        let err = Unplugged.try_fill(&mut [0u8; 4]).unwrap_err();
        assert!(matches!(err, SeedError::Entropy { .. }));
        assert!(err.to_string().contains("device unavailable"));
    }

    #[test]
    fn test_try_fill_succeeds_for_working_source() {
        let mut bytes = [0u8; 16];
        Pcg32::seed_from_u64(3).try_fill(&mut bytes).unwrap();
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_os_random_fills() {
        let mut bytes = [0u8; 32];
        OsRandom.fill(&mut bytes);
        // 32 zero bytes from the OS is vanishingly unlikely
        assert!(bytes.iter().any(|&b| b != 0));
    }
}
