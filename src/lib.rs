//! Paddock - a deterministic race simulation and exacta betting engine
//!
//! Core modules:
//! - `rng`: seeded linear-congruential generator (the only randomness source)
//! - `roster`: the fixed six-horse field and derived attributes
//! - `sim`: deterministic tick-based race simulation
//! - `odds`: exacta probabilities and the public multiplier table
//! - `ledger`: bet validation and the running pot
//! - `payout`: settlement of bets against a race result
//! - `engine`: the state aggregate tying a betting round together
//!
//! All core arithmetic is integer fixed-point scaled by [`consts::PRECISION`];
//! no floating point appears anywhere in the library, so the same seed
//! produces bit-identical results on every platform.

pub mod engine;
pub mod error;
pub mod ledger;
pub mod odds;
pub mod payout;
pub mod rng;
pub mod roster;
pub mod sim;

pub use engine::{RaceEngine, RaceStatus};
pub use error::{Error, Result};
pub use ledger::Bet;
pub use odds::ExactaProbability;
pub use payout::Payout;
pub use roster::{Horse, Roster};
pub use sim::RaceResult;

/// Engine tuning constants
pub mod consts {
    /// Fixed-point scale (4 decimal digits)
    pub const PRECISION: u64 = 10_000;

    /// Number of horses in the field
    pub const NUM_HORSES: usize = 6;
    /// Strength ratings per horse; sum must equal `TOTAL_STRENGTH`
    pub const HORSE_STRENGTHS: [u64; NUM_HORSES] = [6, 5, 4, 3, 2, 1];
    /// Sum of all strengths (6+5+4+3+2+1)
    pub const TOTAL_STRENGTH: u64 = 21;

    /// Race length in track units
    pub const RACE_DISTANCE: u64 = 1_000;
    /// Hard stop tick count (one tick = one simulated second)
    pub const MAX_TICKS: u64 = 60;

    /// First tick of the normal phase (warm-up is [0, 15))
    pub const WARMUP_END_TICK: u64 = 15;
    /// First tick of the sprint phase
    pub const SPRINT_START_TICK: u64 = 45;
    /// Warm-up speed factor, PRECISION-scaled (0.85)
    pub const WARMUP_FACTOR: u64 = 8_500;
    /// Sprint bonus is normalized strength divided by this
    pub const SPRINT_BONUS_DIVISOR: u64 = 12;

    /// Variance bound numerator: each horse swings ±(12/strength) percent
    pub const EPSILON_NUMERATOR: u64 = 12;

    /// Finished horses required before the early-stop projection applies
    pub const MIN_FINISHERS: usize = 3;
}

/// Fixed-point multiply with floor rounding
#[inline]
pub fn fp_mul(a: u64, b: u64) -> u64 {
    a * b / consts::PRECISION
}

/// Fixed-point divide with floor rounding
#[inline]
pub fn fp_div(a: u64, b: u64) -> u64 {
    a * consts::PRECISION / b
}
