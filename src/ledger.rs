//! Bet ledger for the active race.
//!
//! Bets are validated, appended and never touched again; the whole set is
//! cleared only when the round resets. The betting-window check
//! (`BettingClosed`) lives in the engine, which owns the status machine.

use log::info;
use serde::{Deserialize, Serialize};

use crate::consts::NUM_HORSES;
use crate::error::{Error, Result};

/// An accepted exacta bet. Immutable once in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub bettor: String,
    pub amount: u128,
    /// Predicted 1st place horse id
    pub first_pick: u8,
    /// Predicted 2nd place horse id
    pub second_pick: u8,
    /// Caller-supplied; the core never reads a clock
    pub timestamp: u64,
}

/// Append-only bet set with a running pot total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLedger {
    bets: Vec<Bet>,
    total_pot: u128,
}

impl BetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a bet. All-or-nothing: on error nothing changes.
    pub fn place(
        &mut self,
        bettor: String,
        first_pick: u8,
        second_pick: u8,
        amount: u128,
        timestamp: u64,
    ) -> Result<()> {
        if first_pick as usize >= NUM_HORSES || second_pick as usize >= NUM_HORSES {
            return Err(Error::InvalidHorseId);
        }
        if first_pick == second_pick {
            return Err(Error::SameHorsePicked);
        }
        if amount == 0 {
            return Err(Error::ZeroBetAmount);
        }

        info!("bet accepted: {bettor} stakes {amount} on ({first_pick},{second_pick})");
        self.bets.push(Bet {
            bettor,
            amount,
            first_pick,
            second_pick,
            timestamp,
        });
        self.total_pot += amount;
        Ok(())
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn total_pot(&self) -> u128 {
        self.total_pot
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Drop all bets and zero the pot. Only called on round reset.
    pub fn clear(&mut self) {
        self.bets.clear();
        self.total_pot = 0;
    }
}
