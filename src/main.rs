//! Demo harness: one complete betting round, end to end.
//!
//! Run with `RUST_LOG=debug` to watch individual horses cross the line.

use paddock::RaceEngine;

const OPERATOR: &str = "track-operator";

fn main() {
    env_logger::init();

    let mut engine = RaceEngine::new(OPERATOR);

    println!("field:");
    for horse in engine.horses() {
        println!(
            "  #{} {:<14} strength {}  base speed {}",
            horse.id, horse.name, horse.strength, horse.base_speed
        );
    }

    engine.place_bet("alice", 0, 1, 100, 1).expect("bet");
    engine.place_bet("bob", 5, 4, 40, 2).expect("bet");
    engine.place_bet("carol", 2, 0, 250, 3).expect("bet");
    println!("\npot: {}", engine.total_pot());

    engine.start_race(OPERATOR, 0xC0FFEE).expect("start race");
    let result = engine.run_simulation().expect("run simulation");
    let payouts = engine.distribute_payouts().expect("distribute payouts");

    println!(
        "\nresult:\n{}",
        serde_json::to_string_pretty(&result).expect("serialize result")
    );

    if payouts.is_empty() {
        println!("\nno winning exacta bets this race");
    } else {
        for p in &payouts {
            println!(
                "\n{} staked {} and collects {} ({}x)",
                p.bettor, p.bet_amount, p.payout_amount, p.multiplier
            );
        }
    }
}
