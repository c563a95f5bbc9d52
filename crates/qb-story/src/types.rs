//! Story graph types: stories, nodes, choices, and their parts.
//!
//! A [`Story`] is immutable once loaded and shared read-only across all
//! sessions that reference it. Presentation-only fields (scenery, audio,
//! entry animation) are carried untouched for downstream renderers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The three bounded character attributes a check or effect can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    /// Physical power; bounded to 1-12.
    Strength,
    /// Fortune; bounded to 1-12. Spent by luck attacks in battle.
    Luck,
    /// Life force; 0 means dead, no upper bound.
    Health,
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strength => write!(f, "strength"),
            Self::Luck => write!(f, "luck"),
            Self::Health => write!(f, "health"),
        }
    }
}

/// A complete adventure: a titled graph of nodes keyed by node ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Optional display name; if empty, callers derive one from the story ID.
    #[serde(default)]
    pub title: String,
    /// The node ID where new players begin.
    pub start: String,
    /// All nodes in the story, keyed by node ID.
    pub nodes: HashMap<String, Node>,
}

impl Story {
    /// Look up a node by ID.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns true if a node with the given ID exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }
}

/// A single location or scene in the adventure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// Narrative text shown to the player.
    #[serde(default)]
    pub text: String,
    /// Scenery image name for the renderer; empty = default scenery.
    #[serde(default)]
    pub scenery: String,
    /// Ambient audio name for the renderer; empty = none.
    #[serde(default)]
    pub audio: String,
    /// Entry animation name for the renderer (e.g. "door_open"); empty = none.
    #[serde(default)]
    pub entry_animation: String,
    /// Player-selectable actions available at this node.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Effects applied automatically when the player arrives at this node.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// True if this node ends the story.
    #[serde(default)]
    pub ending: bool,
}

/// A player action available at a node.
///
/// Prompt, check, and battle are written as optional fields; when a prompt
/// is present it takes priority and the check/battle are ignored for that
/// choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    /// Key identifying this choice, unique within its node.
    pub key: String,
    /// Label shown to the player.
    #[serde(default)]
    pub text: String,
    /// Destination node ID; may be empty when a check/battle/prompt routes.
    #[serde(default)]
    pub next: String,
    /// Legacy discriminator ("battle_attack", "battle_luck") for stories
    /// written before per-enemy battle actions existed.
    #[serde(default)]
    pub mode: String,
    /// Optional stat check gating the destination.
    #[serde(default)]
    pub check: Option<Check>,
    /// Destination when the check succeeds; empty = keep `next`.
    #[serde(default)]
    pub on_success_next: String,
    /// Destination when the check fails; empty = keep `next`.
    #[serde(default)]
    pub on_failure_next: String,
    /// Stat effects applied when this choice is taken.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Optional battle encounter attached to this choice.
    #[serde(default)]
    pub battle: Option<Battle>,
    /// Optional typed-answer prompt attached to this choice.
    #[serde(default)]
    pub prompt: Option<Prompt>,
}

/// A stat check: roll 2d6 and succeed if the roll is at or below the stat.
///
/// `roll` must be `"2d6"` and `target` must be `"stat"`; any other
/// combination is a configuration error the engine rejects loudly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    /// The stat to test against.
    pub stat: StatKind,
    /// The dice expression; only "2d6" is supported.
    pub roll: String,
    /// The comparison target; only "stat" (roll <= stat) is supported.
    pub target: String,
}

/// An additive, clamped stat mutation.
///
/// Effects with an `op` other than `"add"` are silently skipped so that
/// stories written for newer engines still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    /// The operation; only "add" is applied.
    pub op: String,
    /// The stat to modify.
    pub stat: StatKind,
    /// Signed delta added to the stat.
    #[serde(default)]
    pub value: i32,
    /// Optional story-provided lower bound applied before the global bounds.
    #[serde(default)]
    pub clamp_min: Option<i32>,
    /// Optional story-provided upper bound applied before the global bounds.
    #[serde(default)]
    pub clamp_max: Option<i32>,
}

/// A single enemy definition inside a battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Strength added to the enemy's 2d6 roll each round.
    #[serde(default)]
    pub strength: i32,
    /// Starting health; non-positive values are floored to 1 at encounter start.
    #[serde(default)]
    pub health: i32,
}

/// An opposed-roll combat encounter against one or more enemies.
///
/// Both sides roll 2d6 and add their strength; the higher total scores a
/// hit. The engine resolves one round per invocation. Use `enemies` for
/// multiple foes; the legacy single-enemy fields apply only when
/// `enemies` is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Battle {
    /// The enemies in this encounter.
    #[serde(default)]
    pub enemies: Vec<Enemy>,

    /// Legacy single-enemy name, used when `enemies` is empty.
    #[serde(default)]
    pub enemy_name: String,
    /// Legacy single-enemy strength.
    #[serde(default)]
    pub enemy_strength: i32,
    /// Legacy single-enemy health.
    #[serde(default)]
    pub enemy_health: i32,

    /// Destination when the last enemy falls; empty = keep the choice's `next`.
    #[serde(default)]
    pub on_victory_next: String,
    /// Informational only: defeat always routes to the global death node.
    #[serde(default)]
    pub on_defeat_next: String,
}

/// A question that expects a typed answer.
///
/// Answers route to different nodes; `default_next` is used when no
/// answer matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prompt {
    /// The question shown to the player.
    #[serde(default)]
    pub question: String,
    /// Placeholder text for the input field.
    #[serde(default)]
    pub placeholder: String,
    /// Accepted answers in priority order; first match wins.
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// Destination when no answer matches; empty = fall back or fail soft.
    #[serde(default)]
    pub default_next: String,
    /// Message shown on an empty or unmatched answer; empty = built-in text.
    #[serde(default)]
    pub failure_message: String,
}

/// One or more accepted strings routing to a destination node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answer {
    /// A single accepted string (compared after normalization).
    #[serde(default, rename = "match")]
    pub match_text: String,
    /// Additional accepted strings.
    #[serde(default)]
    pub matches: Vec<String>,
    /// Destination node ID when this answer matches.
    #[serde(default)]
    pub next: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_kind_wire_form() {
        let json = serde_json::to_string(&StatKind::Strength).unwrap();
        assert_eq!(json, "\"strength\"");
        let back: StatKind = serde_json::from_str("\"luck\"").unwrap();
        assert_eq!(back, StatKind::Luck);
    }

    #[test]
    fn stat_kind_display() {
        assert_eq!(StatKind::Strength.to_string(), "strength");
        assert_eq!(StatKind::Luck.to_string(), "luck");
        assert_eq!(StatKind::Health.to_string(), "health");
    }

    #[test]
    fn minimal_story_deserializes() {
        let story: Story = serde_json::from_str(
            r#"{
                "start": "intro",
                "nodes": {
                    "intro": { "text": "You wake up.", "choices": [
                        { "key": "go", "text": "Go", "next": "hall" }
                    ] },
                    "hall": { "text": "A hall.", "ending": true }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(story.start, "intro");
        assert!(story.has_node("hall"));
        assert!(story.node("hall").unwrap().ending);
        assert_eq!(story.node("intro").unwrap().choices[0].next, "hall");
    }

    #[test]
    fn answer_match_field_is_renamed() {
        let answer: Answer =
            serde_json::from_str(r#"{ "match": "echo", "next": "right" }"#).unwrap();
        assert_eq!(answer.match_text, "echo");
        assert_eq!(answer.next, "right");
    }

    #[test]
    fn battle_defaults() {
        let battle: Battle = serde_json::from_str("{}").unwrap();
        assert!(battle.enemies.is_empty());
        assert!(battle.enemy_name.is_empty());
        assert!(battle.on_victory_next.is_empty());
    }

    #[test]
    fn effect_clamps_optional() {
        let effect: Effect =
            serde_json::from_str(r#"{ "op": "add", "stat": "health", "value": -2 }"#).unwrap();
        assert_eq!(effect.value, -2);
        assert!(effect.clamp_min.is_none());
        assert!(effect.clamp_max.is_none());
    }
}
