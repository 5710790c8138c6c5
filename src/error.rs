//! Caller-facing error kinds.
//!
//! Every failure here is a recoverable precondition violation local to one
//! call; the failing operation mutates nothing. Internal invariant breakage
//! (a roster whose strengths stop summing to 21) is a configuration error
//! and panics at construction instead of appearing in this enum.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    /// Bet arrived outside the betting window
    BettingClosed,
    /// Horse id outside the fixed field
    InvalidHorseId,
    /// Exacta picks must name two different horses
    SameHorsePicked,
    /// Bet amount must be greater than zero
    ZeroBetAmount,
    /// Administrative operation from a non-owner caller
    NotOwner,
    /// Race start only allowed from the betting phase
    RaceNotInBettingPhase,
    /// Simulation only allowed while a race is in progress
    RaceNotInProgress,
    /// Settlement only allowed once, on a finished race
    RaceNotFinished,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BettingClosed => write!(f, "betting is closed"),
            Error::InvalidHorseId => write!(f, "invalid horse id"),
            Error::SameHorsePicked => write!(f, "first and second pick must differ"),
            Error::ZeroBetAmount => write!(f, "bet amount must be greater than zero"),
            Error::NotOwner => write!(f, "caller is not the owner"),
            Error::RaceNotInBettingPhase => write!(f, "race is not in the betting phase"),
            Error::RaceNotInProgress => write!(f, "race is not in progress"),
            Error::RaceNotFinished => write!(f, "race is not finished"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::BettingClosed.to_string(), "betting is closed");
        assert_eq!(Error::NotOwner.to_string(), "caller is not the owner");
    }
}
