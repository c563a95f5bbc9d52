//! Choice-resolution and combat engine for Questbook adventures.
//!
//! The engine is a synchronous state-transition function: given a loaded
//! story graph, a player state, and a chosen action key (plus an optional
//! typed answer), it computes the next narrative position, mutates the
//! bounded character statistics, and resolves one battle round at a time.
//! It performs no I/O and owns no sessions; persistence belongs to the
//! caller.

/// Battle encounters: setup, horde collapse, and opposed-roll rounds.
pub mod battle;
/// Stat check resolution.
pub mod check;
/// Dice rolling with entropy, seeded, and scripted sources.
pub mod dice;
/// Additive, clamped stat effects.
pub mod effect;
/// The choice-resolution orchestrator.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// Player and enemy runtime state.
pub mod player;
/// Typed-answer prompt resolution.
pub mod prompt;
/// Bounded character statistics.
pub mod stats;

/// Re-export battle types.
pub use battle::{BattleAction, HORDE_NAME};
/// Re-export dice types.
pub use dice::{DiceRoll, EntropyRoller, Roller, ScriptedRoller, SeededRoller};
/// Re-export the orchestrator types.
pub use engine::{DEATH_NODE_ID, DEFAULT_STORY_ID, Engine, Outcome, StepResult};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export player state types.
pub use player::{DEFAULT_AVATAR, EnemyState, PlayerState};
/// Re-export stat types.
pub use stats::{MAX_STAT, MIN_HEALTH, MIN_STAT, Stats};
