//! The fixed six-horse field and its derived attributes.
//!
//! Everything here is computed once at construction and read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::{HORSE_STRENGTHS, NUM_HORSES, PRECISION, TOTAL_STRENGTH};

/// Display names, index-aligned with `HORSE_STRENGTHS`
const HORSE_NAMES: [&str; NUM_HORSES] = [
    "Thunder Bolt",
    "Silver Arrow",
    "Golden Star",
    "Dark Knight",
    "Wild Spirit",
    "Lucky Charm",
];

/// A race entrant. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horse {
    pub id: u8,
    pub name: String,
    pub strength: u64,
    /// strength / ΣS, PRECISION-scaled
    pub normalized_strength: u64,
    /// 14 + strength, track units per tick
    pub base_speed: u64,
}

/// The full field for a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    horses: Vec<Horse>,
}

impl Roster {
    /// Build the roster from the static strength table.
    ///
    /// Panics if the table no longer sums to `TOTAL_STRENGTH`; that is a
    /// configuration error, not a caller error.
    pub fn new() -> Self {
        let sum: u64 = HORSE_STRENGTHS.iter().sum();
        assert_eq!(
            sum, TOTAL_STRENGTH,
            "strength table must sum to {TOTAL_STRENGTH}, got {sum}"
        );

        let horses = HORSE_STRENGTHS
            .iter()
            .enumerate()
            .map(|(i, &strength)| Horse {
                id: i as u8,
                name: HORSE_NAMES[i].to_string(),
                strength,
                normalized_strength: strength * PRECISION / TOTAL_STRENGTH,
                base_speed: 14 + strength,
            })
            .collect();

        Self { horses }
    }

    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    pub fn horse(&self, id: u8) -> Option<&Horse> {
        self.horses.get(id as usize)
    }

    /// Whether `id` names a horse in the field.
    pub fn contains(&self, id: u8) -> bool {
        (id as usize) < self.horses.len()
    }

    pub fn len(&self) -> usize {
        self.horses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horses.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
