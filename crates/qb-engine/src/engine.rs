//! The choice-resolution orchestrator.
//!
//! [`Engine`] owns the loaded stories (read-only, shared across all
//! sessions) and resolves one player action at a time: it finds the
//! choice, delegates to the prompt/check/battle resolvers, applies
//! effects at the prescribed points, advances the node pointer and
//! visited history, and finally applies the global death rule.

use std::collections::HashMap;

use qb_story::{Node, Story};
use serde::{Deserialize, Serialize};

use crate::battle::battle_turn;
use crate::check::check_roll;
use crate::dice::{DiceRoll, Roller};
use crate::effect::apply_effects;
use crate::error::{EngineError, EngineResult};
use crate::player::PlayerState;
use crate::prompt::{PromptResolution, resolve_prompt};
use crate::stats::MIN_HEALTH;

/// The distinguished node ID a story can define as its death screen.
/// Whenever health reaches 0 the player is routed here, overriding any
/// destination the choice logic computed.
pub const DEATH_NODE_ID: &str = "death";

/// Story ID used when a player state carries an empty story ID.
pub const DEFAULT_STORY_ID: &str = "demo";

/// Soft-failure message for a choice key that matches nothing.
const MSG_UNKNOWN_CHOICE: &str = "That choice doesn't exist.";
/// Soft-failure message when no destination could be resolved.
const MSG_NO_DESTINATION: &str = "No destination for that choice.";

/// The outcome of a stat check or battle round.
///
/// Serialized and displayed in the wire form consumed by the
/// presentation layer (`success`, `player_hit`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A stat check passed.
    Success,
    /// A stat check failed.
    Failure,
    /// The last enemy fell this battle round.
    Victory,
    /// The player's health reached 0 this battle round.
    Defeat,
    /// Equal battle totals; nobody was damaged.
    Tie,
    /// The player damaged an enemy that still stands.
    PlayerHit,
    /// An enemy damaged the player, who still stands.
    EnemyHit,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::Tie => write!(f, "tie"),
            Self::PlayerHit => write!(f, "player_hit"),
            Self::EnemyHit => write!(f, "enemy_hit"),
        }
    }
}

/// The result of applying one player choice.
///
/// Soft failures (invalid choice, unmatched prompt, no destination) set
/// `message` and leave the player state unchanged; they are normal
/// gameplay outcomes, not errors.
#[derive(Debug, Clone, Default)]
pub struct StepResult {
    /// Total of the player's 2d6 roll, when a check or battle round rolled.
    pub roll: Option<i32>,
    /// The player's two die faces, for display.
    pub player_dice: Option<DiceRoll>,
    /// The enemy's two die faces (battle rounds only).
    pub enemy_dice: Option<DiceRoll>,
    /// Outcome of the check or battle round, if one occurred.
    pub outcome: Option<Outcome>,
    /// Human-readable soft-failure message.
    pub message: Option<String>,
}

impl StepResult {
    fn soft_failure(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::default()
        }
    }
}

/// Resolves player choices against a set of loaded stories.
///
/// Stories are immutable once loaded; the engine is safe to share
/// across sessions as long as each [`PlayerState`] has at most one
/// in-flight resolution at a time (the session layer's job).
pub struct Engine {
    stories: HashMap<String, Story>,
}

impl Engine {
    /// Create an engine over a map of story ID to story.
    pub fn new(stories: HashMap<String, Story>) -> Self {
        Self { stories }
    }

    /// Look up a story by ID.
    pub fn story_by_id(&self, id: &str) -> Option<&Story> {
        self.stories.get(id)
    }

    /// The story a player state refers to; an empty story ID resolves
    /// to [`DEFAULT_STORY_ID`].
    pub fn story(&self, state: &PlayerState) -> Option<&Story> {
        let id = if state.story_id.is_empty() {
            DEFAULT_STORY_ID
        } else {
            &state.story_id
        };
        self.stories.get(id)
    }

    /// The node the player is currently on.
    pub fn current_node(&self, state: &PlayerState) -> EngineResult<&Node> {
        let story = self
            .story(state)
            .ok_or_else(|| EngineError::UnknownStory(state.story_id.clone()))?;
        story
            .node(&state.node_id)
            .ok_or_else(|| EngineError::UnknownNode(state.node_id.clone()))
    }

    /// Apply a player choice without a typed answer.
    pub fn apply_choice(
        &self,
        state: &mut PlayerState,
        roller: &mut dyn Roller,
        choice_key: &str,
    ) -> EngineResult<StepResult> {
        self.apply_choice_with_answer(state, roller, choice_key, "")
    }

    /// Apply a player choice and optional typed answer, updating the
    /// state and determining the next node in the story.
    ///
    /// Hard errors ([`EngineError`]) indicate corrupt story data;
    /// everything player-facing comes back as a soft failure on the
    /// [`StepResult`] with the state unchanged.
    pub fn apply_choice_with_answer(
        &self,
        state: &mut PlayerState,
        roller: &mut dyn Roller,
        choice_key: &str,
        answer: &str,
    ) -> EngineResult<StepResult> {
        let story = self
            .story(state)
            .ok_or_else(|| EngineError::UnknownStory(state.story_id.clone()))?;
        let node = story
            .node(&state.node_id)
            .ok_or_else(|| EngineError::UnknownNode(state.node_id.clone()))?;

        // Exact key first, then dynamic battle keys such as
        // "fight:attack:0" that share a battle choice's prefix.
        let choice = node
            .choices
            .iter()
            .find(|c| c.key == choice_key)
            .or_else(|| {
                node.choices.iter().find(|c| {
                    c.battle.is_some()
                        && (choice_key == c.key || has_action_suffix(choice_key, &c.key))
                })
            });
        let Some(choice) = choice else {
            return Ok(StepResult::soft_failure(MSG_UNKNOWN_CHOICE));
        };

        let mut result = StepResult::default();
        let mut next = choice.next.clone();

        if let Some(prompt) = &choice.prompt {
            // A prompt takes priority over check and battle. Effects
            // apply only once the answer routes somewhere.
            match resolve_prompt(prompt, answer, &choice.next) {
                PromptResolution::Rejected(message) => {
                    result.message = Some(message);
                    return Ok(result);
                }
                PromptResolution::Route(dest) => {
                    apply_effects(&mut state.stats, &choice.effects);
                    next = dest;
                }
            }
        } else {
            apply_effects(&mut state.stats, &choice.effects);
            if let Some(check) = &choice.check {
                let roll = roller.roll_2d6();
                result.roll = Some(roll.total());
                result.player_dice = Some(roll);

                let passed = check_roll(&state.stats, check, roll.total())?;
                result.outcome = Some(if passed {
                    Outcome::Success
                } else {
                    Outcome::Failure
                });
                if passed && !choice.on_success_next.is_empty() {
                    next = choice.on_success_next.clone();
                }
                if !passed && !choice.on_failure_next.is_empty() {
                    next = choice.on_failure_next.clone();
                }
            }
        }

        match &choice.battle {
            Some(battle) if choice.prompt.is_none() => {
                if let Some(battle_next) =
                    battle_turn(state, choice, battle, choice_key, roller, &mut result)
                {
                    next = battle_next;
                }
            }
            _ => {
                // A non-battle choice taken while nominally in combat
                // disengages from the encounter.
                if state.has_enemies() {
                    state.enemies.clear();
                }
            }
        }

        if next.is_empty() {
            result.message = Some(MSG_NO_DESTINATION.to_string());
            return Ok(result);
        }

        let old_node_id = state.node_id.clone();
        state.node_id = next;
        if state.node_id != old_node_id {
            state.visited_nodes.push(state.node_id.clone());
            // Entry effects fire on arrival only; a same-node battle
            // continuation must not re-apply them every round.
            if let Some(destination) = story.node(&state.node_id) {
                apply_effects(&mut state.stats, &destination.effects);
            }
        }

        // Global death rule, evaluated last and unconditionally: it can
        // override a battle victory route, a check success route, or a
        // prompt route alike.
        if state.stats.health <= MIN_HEALTH {
            state.stats.health = MIN_HEALTH;
            if story.has_node(DEATH_NODE_ID) && state.node_id != DEATH_NODE_ID {
                state.node_id = DEATH_NODE_ID.to_string();
                state.visited_nodes.push(state.node_id.clone());
            }
        }

        Ok(result)
    }
}

/// True when `choice_key` is `battle_key` plus a colon-delimited suffix.
fn has_action_suffix(choice_key: &str, battle_key: &str) -> bool {
    choice_key
        .strip_prefix(battle_key)
        .is_some_and(|rest| rest.starts_with(':'))
}
