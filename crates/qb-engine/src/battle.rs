//! Battle encounters: setup, horde collapse, and opposed-roll rounds.
//!
//! A battle resolves one round per invocation. Both sides roll 2d6 and
//! add their strength; only the higher total deals damage that round.
//! Encounters with more than three enemies collapse into a single
//! "Horde" entry so large groups stay playable without one button per
//! enemy, while the total health stays accurate.

use qb_story::{Battle, Choice, StatKind};

use crate::dice::{DiceRoll, Roller};
use crate::engine::{DEATH_NODE_ID, Outcome, StepResult};
use crate::player::{EnemyState, PlayerState};
use crate::stats::{MIN_HEALTH, MIN_STAT, Stats};

/// Display name when four or more enemies are combined into one entry.
pub const HORDE_NAME: &str = "Horde";

/// Encounters with more enemies than this collapse into a horde.
const HORDE_THRESHOLD: usize = 3;

/// A battle sub-action, parsed once from the colon-delimited choice key.
///
/// The wire form is `"<battleChoiceKey>:<action>"` with action one of
/// `run`, `attack:<enemyIndex>`, `luck:<enemyIndex>`. This string shape
/// is the contract between the presentation layer (which renders one
/// button per action) and the engine, and must be preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    /// Flee the encounter. Always succeeds; no roll is performed.
    Run,
    /// Attack the enemy at this index for 1 damage.
    Attack(usize),
    /// Spend 1 luck (floored at 1) to attack the enemy at this index
    /// for 2 damage.
    Luck(usize),
}

impl BattleAction {
    /// Parse an action suffix: `run`, `attack:<i>`, or `luck:<i>`.
    /// Unrecognized words or indexes yield `None`.
    pub fn parse(suffix: &str) -> Option<Self> {
        if suffix == "run" {
            return Some(Self::Run);
        }
        if let Some(index) = suffix.strip_prefix("attack:") {
            return index.parse().ok().map(Self::Attack);
        }
        if let Some(index) = suffix.strip_prefix("luck:") {
            return index.parse().ok().map(Self::Luck);
        }
        None
    }

    /// Render the full wire-format choice key for this action.
    pub fn choice_key(self, battle_key: &str) -> String {
        format!("{battle_key}:{self}")
    }
}

impl std::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Run => write!(f, "run"),
            Self::Attack(i) => write!(f, "attack:{i}"),
            Self::Luck(i) => write!(f, "luck:{i}"),
        }
    }
}

/// Materialize initial enemy state from a battle definition.
///
/// Uses the `enemies` list when present, otherwise the legacy
/// single-enemy fields. Non-positive health is floored to 1 so a
/// mistyped definition still yields a fightable enemy.
pub fn initial_enemies(battle: &Battle) -> Vec<EnemyState> {
    if !battle.enemies.is_empty() {
        return battle
            .enemies
            .iter()
            .map(|e| EnemyState {
                name: e.name.clone(),
                strength: e.strength,
                health: e.health.max(1),
            })
            .collect();
    }
    if !battle.enemy_name.is_empty() || battle.enemy_health > 0 {
        return vec![EnemyState {
            name: battle.enemy_name.clone(),
            strength: battle.enemy_strength,
            health: battle.enemy_health.max(1),
        }];
    }
    Vec::new()
}

/// Collapse four or more enemies into a single "Horde" entry whose
/// health is the sum of all healths and whose strength is the floored
/// mean of all strengths, never below the stat minimum. Three or fewer
/// enemies pass through unchanged.
pub fn collapse_to_horde(enemies: Vec<EnemyState>) -> Vec<EnemyState> {
    if enemies.len() <= HORDE_THRESHOLD {
        return enemies;
    }
    let total_health: i32 = enemies.iter().map(|e| e.health).sum();
    let total_strength: i32 = enemies.iter().map(|e| e.strength).sum();
    let mean_strength = (total_strength / enemies.len() as i32).max(MIN_STAT);
    vec![EnemyState {
        name: HORDE_NAME.to_string(),
        strength: mean_strength,
        health: total_health,
    }]
}

/// Resolve one battle invocation for the given choice.
///
/// Initializes the encounter on first invocation, parses the action out
/// of the incoming choice key (falling back to the legacy `mode` field
/// for stories without per-enemy actions), then runs a run/attack/luck
/// turn. Returns the next node ID, or `None` to keep the caller's
/// destination. Unrecognized actions and out-of-range enemy indexes are
/// silent no-ops (`None`): the caller reports the missing destination.
pub(crate) fn battle_turn(
    state: &mut PlayerState,
    choice: &Choice,
    battle: &Battle,
    choice_key: &str,
    roller: &mut dyn Roller,
    result: &mut StepResult,
) -> Option<String> {
    if state.enemies.is_empty() {
        state.enemies = collapse_to_horde(initial_enemies(battle));
        if state.enemies.is_empty() {
            // Malformed battle with zero enemies: treat as already won.
            return destination(&battle.on_victory_next);
        }
    }

    let action = match suffix_of(choice_key, &choice.key) {
        Some(suffix) => BattleAction::parse(suffix),
        // Legacy single-enemy choice: the mode field picks the action.
        None if choice.mode == "battle_luck" => Some(BattleAction::Luck(0)),
        None => Some(BattleAction::Attack(0)),
    };

    let (enemy_index, is_luck) = match action? {
        BattleAction::Run => {
            state.enemies.clear();
            return destination(&choice.next);
        }
        BattleAction::Attack(i) => (i, false),
        BattleAction::Luck(i) => (i, true),
    };
    if enemy_index >= state.enemies.len() {
        return None;
    }

    let mut damage = 1;
    if is_luck {
        // Spending luck floors at the stat minimum: a luck of 1 costs
        // nothing further.
        state.stats.set(StatKind::Luck, state.stats.luck - 1);
        damage = 2;
    }

    let enemy = state.enemies[enemy_index].clone();
    let round = resolve_round(&mut state.stats, enemy.strength, enemy.health, damage, roller);
    result.player_dice = Some(round.player_dice);
    result.enemy_dice = Some(round.enemy_dice);
    result.roll = Some(round.player_dice.total());
    result.outcome = Some(round.outcome);

    state.enemies[enemy_index].health = round.enemy_health;
    if round.enemy_health <= 0 {
        state.enemies.remove(enemy_index);
    }
    if state.enemies.is_empty() {
        return destination(&battle.on_victory_next);
    }
    if round.outcome == Outcome::Defeat {
        // Defeat routes to the global death node, never on_defeat_next.
        state.enemies.clear();
        return Some(DEATH_NODE_ID.to_string());
    }
    // Enemies remain and the player lives: stay on the same node for
    // another round.
    Some(state.node_id.clone())
}

/// `Some(action_suffix)` when the choice key carries a battle sub-action.
fn suffix_of<'a>(choice_key: &'a str, battle_key: &str) -> Option<&'a str> {
    choice_key
        .strip_prefix(battle_key)
        .and_then(|rest| rest.strip_prefix(':'))
}

fn destination(next: &str) -> Option<String> {
    if next.is_empty() {
        None
    } else {
        Some(next.to_string())
    }
}

/// One resolved opposed-roll round.
struct Round {
    player_dice: DiceRoll,
    enemy_dice: DiceRoll,
    enemy_health: i32,
    outcome: Outcome,
}

/// Run a single opposed-roll round between the player and one enemy.
///
/// Exactly one of three branches applies: the player hits, the enemy
/// hits, or the totals tie and nobody is damaged.
fn resolve_round(
    stats: &mut Stats,
    enemy_strength: i32,
    enemy_health: i32,
    player_damage: i32,
    roller: &mut dyn Roller,
) -> Round {
    let mut enemy_health = enemy_health.max(1);

    let player_dice = roller.roll_2d6();
    let enemy_dice = roller.roll_2d6();
    let player_total = stats.strength + player_dice.total();
    let enemy_total = enemy_strength + enemy_dice.total();

    let outcome = if player_total > enemy_total {
        enemy_health = (enemy_health - player_damage).max(0);
        if enemy_health == 0 {
            Outcome::Victory
        } else {
            Outcome::PlayerHit
        }
    } else if enemy_total > player_total {
        stats.set(StatKind::Health, stats.health - 1);
        if stats.health <= MIN_HEALTH {
            Outcome::Defeat
        } else {
            Outcome::EnemyHit
        }
    } else {
        Outcome::Tie
    };

    Round {
        player_dice,
        enemy_dice,
        enemy_health,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use qb_story::Enemy;

    fn enemy(name: &str, strength: i32, health: i32) -> EnemyState {
        EnemyState {
            name: name.to_string(),
            strength,
            health,
        }
    }

    #[test]
    fn action_parsing() {
        assert_eq!(BattleAction::parse("run"), Some(BattleAction::Run));
        assert_eq!(BattleAction::parse("attack:0"), Some(BattleAction::Attack(0)));
        assert_eq!(BattleAction::parse("luck:2"), Some(BattleAction::Luck(2)));
        assert_eq!(BattleAction::parse("attack:"), None);
        assert_eq!(BattleAction::parse("attack:x"), None);
        assert_eq!(BattleAction::parse("parry:0"), None);
        assert_eq!(BattleAction::parse(""), None);
    }

    #[test]
    fn action_wire_keys_round_trip() {
        for action in [
            BattleAction::Run,
            BattleAction::Attack(0),
            BattleAction::Luck(1),
        ] {
            let key = action.choice_key("fight");
            let suffix = suffix_of(&key, "fight").unwrap();
            assert_eq!(BattleAction::parse(suffix), Some(action));
        }
        assert_eq!(BattleAction::Attack(2).choice_key("fight"), "fight:attack:2");
    }

    #[test]
    fn initial_enemies_from_list_floors_health() {
        let battle = Battle {
            enemies: vec![
                Enemy {
                    name: "Rat".to_string(),
                    strength: 3,
                    health: 0,
                },
                Enemy {
                    name: "Bat".to_string(),
                    strength: 2,
                    health: 4,
                },
            ],
            ..Battle::default()
        };
        let enemies = initial_enemies(&battle);
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[0].health, 1);
        assert_eq!(enemies[1].health, 4);
    }

    #[test]
    fn initial_enemies_legacy_single() {
        let battle = Battle {
            enemy_name: "Ogre".to_string(),
            enemy_strength: 9,
            enemy_health: 6,
            ..Battle::default()
        };
        let enemies = initial_enemies(&battle);
        assert_eq!(enemies, vec![enemy("Ogre", 9, 6)]);
    }

    #[test]
    fn initial_enemies_empty_battle() {
        assert!(initial_enemies(&Battle::default()).is_empty());
    }

    #[test]
    fn horde_collapse_sums_health_and_averages_strength() {
        let enemies = vec![
            enemy("a", 2, 2),
            enemy("b", 3, 2),
            enemy("c", 4, 2),
            enemy("d", 5, 2),
        ];
        let collapsed = collapse_to_horde(enemies);
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].name, HORDE_NAME);
        assert_eq!(collapsed[0].health, 8);
        // floor((2+3+4+5)/4) = 3
        assert_eq!(collapsed[0].strength, 3);
    }

    #[test]
    fn horde_strength_never_below_minimum() {
        let enemies = vec![
            enemy("a", 0, 1),
            enemy("b", 0, 1),
            enemy("c", 0, 1),
            enemy("d", 1, 1),
        ];
        let collapsed = collapse_to_horde(enemies);
        assert_eq!(collapsed[0].strength, MIN_STAT);
    }

    #[test]
    fn three_enemies_do_not_collapse() {
        let enemies = vec![enemy("a", 2, 2), enemy("b", 2, 2), enemy("c", 2, 2)];
        assert_eq!(collapse_to_horde(enemies).len(), 3);
    }

    #[test]
    fn player_hit_and_enemy_hit_are_exclusive() {
        // Player rolls 6+6, enemy rolls 1+1: player hits, player health intact.
        let mut stats = Stats::starting();
        let mut roller = ScriptedRoller::new([6, 6, 1, 1]);
        let round = resolve_round(&mut stats, 7, 3, 1, &mut roller);
        assert_eq!(round.outcome, Outcome::PlayerHit);
        assert_eq!(round.enemy_health, 2);
        assert_eq!(stats.health, 12);

        // Enemy rolls higher: player loses 1 health, enemy untouched.
        let mut roller = ScriptedRoller::new([1, 1, 6, 6]);
        let round = resolve_round(&mut stats, 7, 3, 1, &mut roller);
        assert_eq!(round.outcome, Outcome::EnemyHit);
        assert_eq!(round.enemy_health, 3);
        assert_eq!(stats.health, 11);
    }

    #[test]
    fn tie_damages_nobody() {
        let mut stats = Stats::starting();
        let mut roller = ScriptedRoller::new([3, 3, 3, 3]);
        let strength = stats.strength;
        let round = resolve_round(&mut stats, strength, 3, 1, &mut roller);
        assert_eq!(round.outcome, Outcome::Tie);
        assert_eq!(round.enemy_health, 3);
        assert_eq!(stats.health, 12);
    }

    #[test]
    fn killing_blow_is_victory() {
        let mut stats = Stats::starting();
        let mut roller = ScriptedRoller::new([6, 6, 1, 1]);
        let round = resolve_round(&mut stats, 1, 1, 1, &mut roller);
        assert_eq!(round.outcome, Outcome::Victory);
        assert_eq!(round.enemy_health, 0);
    }

    #[test]
    fn last_health_lost_is_defeat() {
        let mut stats = Stats::starting();
        stats.health = 1;
        let mut roller = ScriptedRoller::new([1, 1, 6, 6]);
        let round = resolve_round(&mut stats, 7, 3, 1, &mut roller);
        assert_eq!(round.outcome, Outcome::Defeat);
        assert_eq!(stats.health, 0);
    }
}
