//! Player and enemy runtime state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dice::Roller;
use crate::stats::Stats;

/// Avatar ID assigned to new players.
pub const DEFAULT_AVATAR: &str = "male_young";

/// One enemy in an active encounter.
///
/// Transient: created when a battle choice is first invoked and cleared
/// on victory, defeat, or flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    /// Display name.
    pub name: String,
    /// Strength added to the enemy's roll each round.
    pub strength: i32,
    /// Remaining health; positive while alive.
    pub health: i32,
}

/// The full game state for one player session.
///
/// Owned by the session store; the engine mutates it through an
/// exclusive borrow and never destroys it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current position in the story graph.
    pub node_id: String,
    /// The story this player is in.
    pub story_id: String,
    /// Character display name.
    pub name: String,
    /// Avatar ID for the renderer.
    pub avatar: String,
    /// Core attributes.
    pub stats: Stats,
    /// True once the one-shot starting-stat reroll has been spent.
    pub reroll_used: bool,
    /// Open-ended story-defined boolean flags.
    pub flags: HashMap<String, bool>,
    /// Enemies in the active encounter; empty when not in combat.
    /// Up to 3 tracked individually; 4+ are stored as one "Horde" entry.
    pub enemies: Vec<EnemyState>,
    /// Node IDs in visit order, for downstream map rendering.
    pub visited_nodes: Vec<String>,
}

impl PlayerState {
    /// Create a new player at the start of a story with default stats.
    pub fn new(story_id: impl Into<String>, start_node_id: impl Into<String>) -> Self {
        let start = start_node_id.into();
        Self {
            node_id: start.clone(),
            story_id: story_id.into(),
            name: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            stats: Stats::starting(),
            reroll_used: false,
            flags: HashMap::new(),
            enemies: Vec::new(),
            visited_nodes: vec![start],
        }
    }

    /// True if the player is in an active battle.
    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    /// Reroll starting stats. Allowed once per session; returns false
    /// (leaving stats untouched) if the reroll was already spent.
    pub fn reroll_stats(&mut self, roller: &mut dyn Roller) -> bool {
        if self.reroll_used {
            return false;
        }
        self.stats = Stats::roll(roller);
        self.reroll_used = true;
        true
    }

    /// Check a story flag; unset flags read as false.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Set a story flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }
}
