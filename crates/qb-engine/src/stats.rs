//! Bounded character statistics.
//!
//! Strength and luck always lie in 1-12; health is never negative and
//! has no upper bound. The bounds are enforced on every write through
//! [`Stats::set`], so no reachable state can violate them.

use qb_story::StatKind;
use serde::{Deserialize, Serialize};

use crate::dice::Roller;

/// Lowest value for strength and luck.
pub const MIN_STAT: i32 = 1;
/// Highest value for strength and luck.
pub const MAX_STAT: i32 = 12;
/// Lowest health; 0 means dead.
pub const MIN_HEALTH: i32 = 0;

/// A character's core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Physical power, 1-12.
    pub strength: i32,
    /// Fortune, 1-12.
    pub luck: i32,
    /// Life force, 0 or more.
    pub health: i32,
}

impl Stats {
    /// Default starting stats for a new player.
    pub fn starting() -> Self {
        Self {
            strength: 7,
            luck: 7,
            health: 12,
        }
    }

    /// Roll random starting stats: strength and luck are 2d6, health is
    /// 2d6 + 6.
    pub fn roll(roller: &mut dyn Roller) -> Self {
        Self {
            strength: roller.roll_2d6().total(),
            luck: roller.roll_2d6().total(),
            health: roller.roll_2d6().total() + 6,
        }
    }

    /// Read a stat by kind.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Luck => self.luck,
            StatKind::Health => self.health,
        }
    }

    /// Write a stat by kind, clamping to the global bounds for that stat.
    pub fn set(&mut self, kind: StatKind, value: i32) {
        let clamped = clamp_stat(kind, value);
        match kind {
            StatKind::Strength => self.strength = clamped,
            StatKind::Luck => self.luck = clamped,
            StatKind::Health => self.health = clamped,
        }
    }

    /// True if health has reached 0.
    pub fn is_dead(&self) -> bool {
        self.health <= MIN_HEALTH
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::starting()
    }
}

/// Clamp a value to the global bounds for a stat: strength and luck to
/// 1-12, health to 0 or more.
pub fn clamp_stat(kind: StatKind, value: i32) -> i32 {
    match kind {
        StatKind::Strength | StatKind::Luck => value.clamp(MIN_STAT, MAX_STAT),
        StatKind::Health => value.max(MIN_HEALTH),
    }
}
