//! Settlement of bets against a race result.

use log::info;
use serde::{Deserialize, Serialize};

use crate::ledger::Bet;
use crate::odds;
use crate::sim::RaceResult;

/// A winning bet's settlement record. Only produced for bets matching the
/// winning exacta exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub bettor: String,
    pub bet_amount: u128,
    pub multiplier: u64,
    pub payout_amount: u128,
    pub exacta: (u8, u8),
}

/// Settle every bet in the ledger against the result. A bet on the exact
/// winning pair pays `amount × multiplier`; any other bet pays nothing and
/// produces no record.
pub fn settle(bets: &[Bet], result: &RaceResult) -> Vec<Payout> {
    let (first, second) = result.winning_exacta;
    let multiplier = odds::multiplier(first, second);

    let mut payouts = Vec::new();
    for bet in bets {
        if bet.first_pick == first && bet.second_pick == second {
            let payout_amount = bet.amount * multiplier as u128;
            info!(
                "payout: {} wins {payout_amount} ({multiplier}x on a {} stake)",
                bet.bettor, bet.amount
            );
            payouts.push(Payout {
                bettor: bet.bettor.clone(),
                bet_amount: bet.amount,
                multiplier,
                payout_amount,
                exacta: (first, second),
            });
        }
    }
    payouts
}
