//! Deterministic RNG for race simulation.
//!
//! Classic linear-congruential generator with glibc constants, kept
//! hand-rolled so the draw sequence is auditable and stable across
//! re-implementations. Not cryptographically secure: anyone who knows the
//! seed can predict every draw, which is fine because the seed is committed
//! before the race and the point is replayability, not secrecy.

use serde::{Deserialize, Serialize};

/// LCG multiplier (glibc)
const LCG_A: u64 = 1_103_515_245;
/// LCG increment (glibc)
const LCG_C: u64 = 12_345;
/// LCG modulus, 2^31
const LCG_M: u64 = 1 << 31;

/// Deterministic LCG with a single 64-bit state word.
///
/// Seeded once per race; the output sequence is a pure function of the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw value in `[0, 2^31)`.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = (self.state.wrapping_mul(LCG_A).wrapping_add(LCG_C)) % LCG_M;
        self.state
    }

    /// Draw a value in `[0, span)`.
    #[inline]
    pub fn next_below(&mut self, span: u64) -> u64 {
        debug_assert!(span > 0);
        self.next_u64() % span
    }

    /// Symmetric draw in `[-bound, +bound]` (fixed-point units).
    #[inline]
    pub fn next_symmetric(&mut self, bound: u64) -> i64 {
        let span = 2 * bound + 1;
        self.next_below(span) as i64 - bound as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_draw_from_zero_seed() {
        // 0 * A + C mod M = C
        let mut rng = Lcg::new(0);
        assert_eq!(rng.next_u64(), 12_345);
    }

    #[test]
    fn test_output_stays_below_modulus() {
        let mut rng = Lcg::new(u64::MAX);
        for _ in 0..1_000 {
            assert!(rng.next_u64() < LCG_M);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Lcg::new(987_654_321);
        let mut b = Lcg::new(987_654_321);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_symmetric_draw_within_bounds() {
        let mut rng = Lcg::new(42);
        let mut seen_negative = false;
        let mut seen_positive = false;
        for _ in 0..1_000 {
            let eps = rng.next_symmetric(1_200);
            assert!((-1_200..=1_200).contains(&eps));
            seen_negative |= eps < 0;
            seen_positive |= eps > 0;
        }
        // Both signs should show up over a long run
        assert!(seen_negative && seen_positive);
    }
}
