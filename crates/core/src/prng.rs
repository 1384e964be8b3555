//! Seedable Xorshift64 generator used to scatter particles.
//!
//! A fixed seed gives a fixed particle layout, which keeps snapshots and
//! tests reproducible. Browser hosts seed it from the clock.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is a fixed point of the algorithm and is replaced with
/// [`Xorshift64::FALLBACK_SEED`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform f64 in (min, max].
    ///
    /// Mirror image of [`next_range`](Self::next_range); particle depth uses it
    /// so that a freshly drawn depth can never be zero.
    pub fn next_range_upper(&mut self, min: f64, max: f64) -> f64 {
        max - self.next_f64() * (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Changing this breaks every seeded snapshot.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_uses_fallback() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        let first = zero.next_u64();
        assert_ne!(first, 0);
        assert_eq!(first, fallback.next_u64());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(2024);
        let mut b = Xorshift64::new(2024);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn next_range_upper_never_returns_min() {
        let mut rng = Xorshift64::new(31337);
        for _ in 0..10_000 {
            let z = rng.next_range_upper(0.0, 1000.0);
            assert!(z > 0.0 && z <= 1000.0, "depth {z} outside (0, 1000]");
        }
    }

    #[test]
    fn state_survives_json() {
        let mut rng = Xorshift64::new(7);
        for _ in 0..20 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for _ in 0..50 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v}");
                }
            }

            #[test]
            fn ranges_respect_their_open_ends(
                seed: u64,
                min in -1e4_f64..1e4,
                span in 1e-3_f64..1e4,
            ) {
                let max = min + span;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let lo = rng.next_range(min, max);
                    prop_assert!(lo >= min && lo < max, "next_range gave {lo}");
                    let hi = rng.next_range_upper(min, max);
                    prop_assert!(hi > min && hi <= max, "next_range_upper gave {hi}");
                }
            }
        }
    }
}
