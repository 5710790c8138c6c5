//! The engine aggregate: status machine, owner, ledger, history.
//!
//! One explicit state value owns everything a betting round touches. Every
//! operation validates its required source status up front and mutates
//! nothing on failure; there is no internal locking because the engine
//! assumes at most one in-flight mutation at a time (serialization is the
//! host's job). The whole aggregate is serde-serializable, so a host can
//! persist and restore it between invocations.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ledger::{Bet, BetLedger};
use crate::odds::{self, ExactaProbability};
use crate::payout::{self, Payout};
use crate::roster::{Horse, Roster};
use crate::sim::{RaceResult, RaceSimulator};

/// Round lifecycle. Bets are only accepted in `Betting`; `Racing` means a
/// seed is committed; `Finished` means a result exists and is settleable;
/// `Closed` means payouts have gone out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RaceStatus {
    #[default]
    Betting,
    Racing,
    Finished,
    Closed,
}

/// Complete engine state for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceEngine {
    owner: String,
    race_id: u64,
    status: RaceStatus,
    roster: Roster,
    ledger: BetLedger,
    current_seed: u64,
    latest_result: Option<RaceResult>,
    /// Append-only; survives resets.
    history: Vec<RaceResult>,
    payouts: Vec<Payout>,
}

impl RaceEngine {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            race_id: 1,
            status: RaceStatus::Betting,
            roster: Roster::new(),
            ledger: BetLedger::new(),
            current_seed: 0,
            latest_result: None,
            history: Vec::new(),
            payouts: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Accept an exacta bet for the current round.
    pub fn place_bet(
        &mut self,
        bettor: impl Into<String>,
        first_pick: u8,
        second_pick: u8,
        amount: u128,
        timestamp: u64,
    ) -> Result<()> {
        if self.status != RaceStatus::Betting {
            return Err(Error::BettingClosed);
        }
        self.ledger
            .place(bettor.into(), first_pick, second_pick, amount, timestamp)
    }

    /// Commit the seed and close betting. Owner only.
    pub fn start_race(&mut self, caller: &str, seed: u64) -> Result<()> {
        if caller != self.owner {
            return Err(Error::NotOwner);
        }
        if self.status != RaceStatus::Betting {
            return Err(Error::RaceNotInBettingPhase);
        }

        self.current_seed = seed;
        self.status = RaceStatus::Racing;
        info!(
            "race {} started: seed {seed}, {} bets, pot {}",
            self.race_id,
            self.ledger.len(),
            self.ledger.total_pot()
        );
        Ok(())
    }

    /// Run the bounded tick simulation to completion, record the result in
    /// the history and move the round to `Finished`.
    pub fn run_simulation(&mut self) -> Result<RaceResult> {
        if self.status != RaceStatus::Racing {
            return Err(Error::RaceNotInProgress);
        }

        let sim = RaceSimulator::new(&self.roster, self.current_seed);
        let result = sim.run(self.race_id, self.ledger.total_pot());

        self.latest_result = Some(result.clone());
        self.history.push(result.clone());
        self.status = RaceStatus::Finished;
        Ok(result)
    }

    /// Settle all bets against the latest result, then close the round.
    ///
    /// Closing means a second invocation fails `RaceNotFinished`, so a race
    /// can never pay out twice.
    pub fn distribute_payouts(&mut self) -> Result<Vec<Payout>> {
        if self.status != RaceStatus::Finished {
            return Err(Error::RaceNotFinished);
        }
        let result = self.latest_result.as_ref().ok_or(Error::RaceNotFinished)?;

        let payouts = payout::settle(self.ledger.bets(), result);
        self.payouts = payouts.clone();
        self.status = RaceStatus::Closed;
        info!(
            "race {} settled: {} winning bets",
            self.race_id,
            payouts.len()
        );
        Ok(payouts)
    }

    /// Open the next round. Owner only. Clears bets, payouts and the active
    /// result; the history is preserved.
    pub fn reset(&mut self, caller: &str) -> Result<()> {
        if caller != self.owner {
            return Err(Error::NotOwner);
        }

        self.ledger.clear();
        self.payouts.clear();
        self.latest_result = None;
        self.current_seed = 0;
        self.race_id += 1;
        self.status = RaceStatus::Betting;
        info!("reset: race {} open for betting", self.race_id);
        Ok(())
    }

    /// Transfer ownership. Owner only.
    pub fn set_owner(&mut self, caller: &str, new_owner: impl Into<String>) -> Result<()> {
        if caller != self.owner {
            return Err(Error::NotOwner);
        }
        self.owner = new_owner.into();
        Ok(())
    }

    /// Start and simulate in one call. Owner only; for demos and tests.
    pub fn simulate_complete_race(&mut self, caller: &str, seed: u64) -> Result<RaceResult> {
        self.start_race(caller, seed)?;
        self.run_simulation()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn horses(&self) -> &[Horse] {
        self.roster.horses()
    }

    pub fn bets(&self) -> &[Bet] {
        self.ledger.bets()
    }

    pub fn total_pot(&self) -> u128 {
        self.ledger.total_pot()
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn race_id(&self) -> u64 {
        self.race_id
    }

    pub fn latest_result(&self) -> Option<&RaceResult> {
        self.latest_result.as_ref()
    }

    pub fn history(&self) -> &[RaceResult] {
        &self.history
    }

    /// Winning (1st, 2nd) pair of the active result, if any.
    pub fn winners(&self) -> Option<(u8, u8)> {
        self.latest_result.as_ref().map(|r| r.winning_exacta)
    }

    pub fn multiplier(&self, first: u8, second: u8) -> u64 {
        odds::multiplier(first, second)
    }

    pub fn probability(&self, first: u8, second: u8) -> Result<u64> {
        odds::probability(first, second)
    }

    pub fn odds_table(&self) -> Vec<ExactaProbability> {
        odds::table()
    }

    pub fn normalized_strength(&self, id: u8) -> Option<u64> {
        self.roster.horse(id).map(|h| h.normalized_strength)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "operator";

    fn engine() -> RaceEngine {
        RaceEngine::new(OWNER)
    }

    /// Place one bet on every ordered pair so exactly matching bets exist
    /// regardless of which exacta comes up.
    fn cover_all_pairs(engine: &mut RaceEngine, amount: u128) {
        for first in 0..6u8 {
            for second in 0..6u8 {
                if first != second {
                    engine
                        .place_bet(format!("b{first}{second}"), first, second, amount, 0)
                        .unwrap();
                }
            }
        }
    }

    #[test]
    fn test_new_engine_is_open_for_betting() {
        let engine = engine();
        assert_eq!(engine.status(), RaceStatus::Betting);
        assert_eq!(engine.race_id(), 1);
        assert_eq!(engine.horses().len(), 6);
        assert_eq!(engine.owner(), OWNER);
        assert!(engine.latest_result().is_none());
    }

    #[test]
    fn test_full_round_lifecycle() {
        let mut engine = engine();
        cover_all_pairs(&mut engine, 10);
        assert_eq!(engine.total_pot(), 300);

        engine.start_race(OWNER, 42).unwrap();
        assert_eq!(engine.status(), RaceStatus::Racing);

        let result = engine.run_simulation().unwrap();
        assert_eq!(engine.status(), RaceStatus::Finished);
        assert_eq!(result.total_pot, 300);
        assert_eq!(engine.winners(), Some(result.winning_exacta));

        let payouts = engine.distribute_payouts().unwrap();
        assert_eq!(engine.status(), RaceStatus::Closed);
        // Exactly one of the 30 bets matches the winning pair
        assert_eq!(payouts.len(), 1);
        let (first, second) = result.winning_exacta;
        assert_eq!(
            payouts[0].payout_amount,
            10 * engine.multiplier(first, second) as u128
        );
        assert_eq!(engine.payouts(), payouts.as_slice());
    }

    #[test]
    fn test_betting_closes_when_race_starts() {
        let mut engine = engine();
        engine.start_race(OWNER, 1).unwrap();
        assert_eq!(
            engine.place_bet("alice", 0, 1, 100, 0),
            Err(Error::BettingClosed)
        );
    }

    #[test]
    fn test_owner_checks() {
        let mut engine = engine();
        assert_eq!(engine.start_race("mallory", 1), Err(Error::NotOwner));
        assert_eq!(engine.reset("mallory"), Err(Error::NotOwner));
        assert_eq!(engine.set_owner("mallory", "mallory"), Err(Error::NotOwner));

        engine.set_owner(OWNER, "new-op").unwrap();
        assert_eq!(engine.owner(), "new-op");
        assert_eq!(engine.start_race(OWNER, 1), Err(Error::NotOwner));
        engine.start_race("new-op", 1).unwrap();
    }

    #[test]
    fn test_status_gates() {
        let mut engine = engine();
        assert_eq!(engine.run_simulation(), Err(Error::RaceNotInProgress));
        assert_eq!(engine.distribute_payouts(), Err(Error::RaceNotFinished));

        engine.start_race(OWNER, 5).unwrap();
        assert_eq!(engine.start_race(OWNER, 5), Err(Error::RaceNotInBettingPhase));
        assert_eq!(engine.distribute_payouts(), Err(Error::RaceNotFinished));
    }

    #[test]
    fn test_double_settlement_rejected() {
        let mut engine = engine();
        cover_all_pairs(&mut engine, 10);
        engine.simulate_complete_race(OWNER, 7).unwrap();

        engine.distribute_payouts().unwrap();
        assert_eq!(engine.distribute_payouts(), Err(Error::RaceNotFinished));
    }

    #[test]
    fn test_settlement_with_no_bets_is_empty() {
        let mut engine = engine();
        engine.simulate_complete_race(OWNER, 9).unwrap();
        assert!(engine.distribute_payouts().unwrap().is_empty());
    }

    #[test]
    fn test_reset_opens_next_round_and_keeps_history() {
        let mut engine = engine();
        engine.place_bet("alice", 0, 1, 100, 0).unwrap();
        let result = engine.simulate_complete_race(OWNER, 11).unwrap();
        engine.distribute_payouts().unwrap();

        engine.reset(OWNER).unwrap();
        assert_eq!(engine.status(), RaceStatus::Betting);
        assert_eq!(engine.race_id(), 2);
        assert_eq!(engine.total_pot(), 0);
        assert!(engine.bets().is_empty());
        assert!(engine.payouts().is_empty());
        assert!(engine.latest_result().is_none());
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0], result);
    }

    #[test]
    fn test_determinism_across_engines() {
        let mut a = engine();
        let mut b = engine();
        let ra = a.simulate_complete_race(OWNER, 777).unwrap();
        let rb = b.simulate_complete_race(OWNER, 777).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_history_accumulates_across_rounds() {
        let mut engine = engine();
        for round in 0..3u64 {
            engine.simulate_complete_race(OWNER, 100 + round).unwrap();
            engine.distribute_payouts().unwrap();
            engine.reset(OWNER).unwrap();
        }
        assert_eq!(engine.history().len(), 3);
        assert_eq!(engine.history()[0].race_id, 1);
        assert_eq!(engine.history()[2].race_id, 3);
        assert_eq!(engine.race_id(), 4);
    }

    #[test]
    fn test_engine_round_trips_through_json() {
        let mut engine = engine();
        engine.place_bet("alice", 0, 1, 100, 0).unwrap();
        engine.simulate_complete_race(OWNER, 13).unwrap();

        let json = serde_json::to_string(&engine).unwrap();
        let restored: RaceEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, engine);
    }

    #[test]
    fn test_query_surface() {
        let engine = engine();
        assert_eq!(engine.multiplier(0, 1), 2);
        assert_eq!(engine.probability(0, 1).unwrap(), 952);
        assert_eq!(engine.odds_table().len(), 30);
        assert_eq!(engine.normalized_strength(0), Some(2_857));
        assert_eq!(engine.normalized_strength(6), None);
    }
}
