//! Exacta odds: win probabilities and the public multiplier table.
//!
//! Probabilities follow the draw-without-replacement formula
//! `P(i→j) = (S[i]/ΣS) · (S[j]/(ΣS − S[i]))` in PRECISION-scaled fixed point
//! with floor rounding at each division. Multipliers are not derived from
//! the probabilities; they are a fixed curated table approximating inverse
//! probability with a house edge.

use serde::{Deserialize, Serialize};

use crate::consts::{HORSE_STRENGTHS, NUM_HORSES, PRECISION, TOTAL_STRENGTH};
use crate::error::{Error, Result};

/// One row of the public odds table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactaProbability {
    pub first: u8,
    pub second: u8,
    /// P(first → second), PRECISION-scaled
    pub probability: u64,
    pub multiplier: u64,
}

/// Curated payout multipliers, row = first pick, column = second pick.
/// The diagonal is zero: an exacta cannot name the same horse twice.
const MULTIPLIERS: [[u64; NUM_HORSES]; NUM_HORSES] = [
    [0, 2, 3, 10, 30, 60],
    [3, 0, 5, 20, 125, 175],
    [4, 6, 0, 8, 80, 100],
    [8, 15, 12, 0, 250, 500],
    [40, 150, 100, 300, 0, 1_000],
    [80, 250, 200, 600, 1_500, 0],
];

/// Probability for a pair already known to be valid.
fn probability_unchecked(first: u8, second: u8) -> u64 {
    let s_first = HORSE_STRENGTHS[first as usize];
    let s_second = HORSE_STRENGTHS[second as usize];

    // P(first wins) = S[first] / ΣS
    let p_first = s_first * PRECISION / TOTAL_STRENGTH;
    // P(second | first won) = S[second] / (ΣS - S[first])
    let p_second = s_second * PRECISION / (TOTAL_STRENGTH - s_first);

    p_first * p_second / PRECISION
}

/// Exacta win probability `P(first → second)`, PRECISION-scaled.
pub fn probability(first: u8, second: u8) -> Result<u64> {
    if first as usize >= NUM_HORSES || second as usize >= NUM_HORSES {
        return Err(Error::InvalidHorseId);
    }
    if first == second {
        return Err(Error::SameHorsePicked);
    }
    Ok(probability_unchecked(first, second))
}

/// Payout multiplier for a combination; 0 when the pair is not a valid exacta.
pub fn multiplier(first: u8, second: u8) -> u64 {
    if first as usize >= NUM_HORSES || second as usize >= NUM_HORSES {
        return 0;
    }
    MULTIPLIERS[first as usize][second as usize]
}

/// The full 30-entry table, first pick ascending then second pick ascending.
pub fn table() -> Vec<ExactaProbability> {
    let mut rows = Vec::with_capacity(NUM_HORSES * (NUM_HORSES - 1));
    for first in 0..NUM_HORSES as u8 {
        for second in 0..NUM_HORSES as u8 {
            if first == second {
                continue;
            }
            rows.push(ExactaProbability {
                first,
                second,
                probability: probability_unchecked(first, second),
                multiplier: MULTIPLIERS[first as usize][second as usize],
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_reference_values() {
        // P(0→1) = (6/21) * (5/15) = 2857 * 3333 / 10000 = 952 (9.52%)
        assert_eq!(probability(0, 1).unwrap(), 952);
        // P(5→4) = (1/21) * (2/20) = 476 * 1000 / 10000 = 47 (~0.48%)
        let p = probability(5, 4).unwrap();
        assert!((45..=48).contains(&p));
    }

    #[test]
    fn test_probability_ordering() {
        // Strongest pair beats weakest pair by a wide margin
        assert!(probability(0, 1).unwrap() > probability(5, 4).unwrap());
    }

    #[test]
    fn test_probability_rejects_bad_pairs() {
        assert_eq!(probability(6, 0), Err(Error::InvalidHorseId));
        assert_eq!(probability(0, 6), Err(Error::InvalidHorseId));
        assert_eq!(probability(3, 3), Err(Error::SameHorsePicked));
    }

    #[test]
    fn test_multiplier_reference_values() {
        assert_eq!(multiplier(0, 1), 2);
        assert_eq!(multiplier(0, 5), 60);
        assert_eq!(multiplier(4, 5), 1_000);
        assert_eq!(multiplier(5, 4), 1_500);
        // Diagonal and out-of-range are zero
        assert_eq!(multiplier(2, 2), 0);
        assert_eq!(multiplier(6, 0), 0);
    }

    #[test]
    fn test_table_covers_all_ordered_pairs() {
        let rows = table();
        assert_eq!(rows.len(), 30);

        // Stable order: first ascending, then second ascending
        for pair in rows.windows(2) {
            assert!((pair[0].first, pair[0].second) < (pair[1].first, pair[1].second));
        }

        for row in &rows {
            assert!(row.first < 6 && row.second < 6);
            assert_ne!(row.first, row.second);
            assert!(row.multiplier > 0);
            assert!(row.probability > 0);
        }
    }

    #[test]
    fn test_table_matches_point_queries() {
        for row in table() {
            assert_eq!(row.probability, probability(row.first, row.second).unwrap());
            assert_eq!(row.multiplier, multiplier(row.first, row.second));
        }
    }
}
