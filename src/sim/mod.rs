//! Deterministic race simulation
//!
//! All race logic lives here. This module must be pure and deterministic:
//! - Fixed tick timestep only
//! - Seeded RNG only, advanced in a stable order (horse id ascending per tick)
//! - Integer fixed-point arithmetic, no floats
//! - No clocks, I/O or platform dependencies

pub mod race;
pub mod speed;

pub use race::{HorseRaceState, RaceResult, RaceSimulator};
pub use speed::{epsilon_max, max_speed, phase_constant, tick_speed};
