//! Phase and variance speed model.
//!
//! A race has three time phases: warm-up (ticks [0,15)) at 0.85 of base
//! speed, normal ([15,45)) at full speed, and sprint (from 45) with a
//! strength-proportional bonus. Each tick a horse's speed is perturbed by a
//! bounded random epsilon; weaker horses swing more. Everything is
//! PRECISION-scaled integer with floor rounding.

use crate::consts::{
    EPSILON_NUMERATOR, PRECISION, SPRINT_BONUS_DIVISOR, SPRINT_START_TICK, WARMUP_END_TICK,
    WARMUP_FACTOR,
};
use crate::fp_mul;
use crate::roster::Horse;

/// Phase constant for the given elapsed tick, PRECISION-scaled.
pub fn phase_constant(horse: &Horse, tick: u64) -> u64 {
    if tick < WARMUP_END_TICK {
        WARMUP_FACTOR
    } else if tick < SPRINT_START_TICK {
        PRECISION
    } else {
        // Sprint bonus: normalized strength / 12
        PRECISION + horse.normalized_strength / SPRINT_BONUS_DIVISOR
    }
}

/// Variance bound: ±(12/strength) percent, PRECISION-scaled.
pub fn epsilon_max(horse: &Horse) -> u64 {
    EPSILON_NUMERATOR * PRECISION / (100 * horse.strength)
}

/// Speed for one tick given a drawn epsilon in `[-eps_max, +eps_max]`.
///
/// `speed = base · phase_constant · (1 + epsilon)`, clamped at zero.
/// Fixed-point track units per tick.
pub fn tick_speed(horse: &Horse, tick: u64, epsilon: i64) -> u64 {
    let base = horse.base_speed * PRECISION;
    let phased = fp_mul(base, phase_constant(horse, tick));
    let factor = (PRECISION as i64 + epsilon).max(0) as u64;
    fp_mul(phased, factor)
}

/// Theoretical per-tick maximum: sprint constant with full positive variance.
/// Used by the simulator's overtake-impossibility projection.
pub fn max_speed(horse: &Horse) -> u64 {
    let base = horse.base_speed * PRECISION;
    let sprint = PRECISION + horse.normalized_strength / SPRINT_BONUS_DIVISOR;
    fp_mul(fp_mul(base, sprint), PRECISION + epsilon_max(horse))
}
