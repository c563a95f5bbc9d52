use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use qb_engine::{
    BattleAction, Engine, EntropyRoller, Outcome, PlayerState, Roller, SeededRoller, StepResult,
};
use qb_story::Node;

pub fn run(dir: &Path, story_id: &str, seed: Option<u64>) -> Result<(), String> {
    let stories = super::load_dir(dir)?;
    let Some(story) = stories.get(story_id) else {
        return Err(format!("unknown story '{story_id}'"));
    };
    let start = story.start.clone();
    let title = if story.title.is_empty() {
        story_id.to_string()
    } else {
        story.title.clone()
    };

    let engine = Engine::new(stories);
    let mut state = PlayerState::new(story_id, start);
    let mut roller: Box<dyn Roller> = match seed {
        Some(seed) => Box::new(SeededRoller::new(seed)),
        None => Box::new(EntropyRoller),
    };

    println!("{}", title.bold());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let node = engine.current_node(&state).map_err(|e| e.to_string())?;
        println!();
        println!("{}", node.text);
        println!("{}", status_line(&state).dimmed());

        if node.ending {
            println!();
            println!("{}", "The End.".bold());
            return Ok(());
        }

        let entries = menu_entries(node, &state);
        if entries.is_empty() {
            return Err(format!(
                "node '{}' has no choices and no ending",
                state.node_id
            ));
        }
        println!();
        for (i, entry) in entries.iter().enumerate() {
            println!("  {}. {}", i + 1, entry.label);
        }
        print!("> ");
        let _ = io::stdout().flush();

        let Some(input) = next_line(&mut lines) else {
            return Ok(());
        };
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            return Ok(());
        }
        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| entries.get(n));
        let Some(entry) = picked else {
            println!("{}", "Pick a number from the list (or 'q' to quit).".yellow());
            continue;
        };

        let mut answer = String::new();
        if let Some(question) = &entry.question {
            println!("{}", question.italic());
            print!("? ");
            let _ = io::stdout().flush();
            let Some(line) = next_line(&mut lines) else {
                return Ok(());
            };
            answer = line;
        }

        let result = engine
            .apply_choice_with_answer(&mut state, roller.as_mut(), &entry.key, &answer)
            .map_err(|e| e.to_string())?;
        report(&result);
    }
}

/// One numbered line in the action menu.
struct MenuEntry {
    key: String,
    label: String,
    question: Option<String>,
}

/// Menu lines for a node. A battle choice in active combat expands into
/// per-enemy attack and luck actions plus a run action, using the
/// colon-delimited keys the engine parses.
fn menu_entries(node: &Node, state: &PlayerState) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    for choice in &node.choices {
        match &choice.battle {
            Some(_) if state.has_enemies() => {
                for (i, enemy) in state.enemies.iter().enumerate() {
                    entries.push(MenuEntry {
                        key: BattleAction::Attack(i).choice_key(&choice.key),
                        label: format!("Attack {} ({} HP)", enemy_name(&enemy.name), enemy.health),
                        question: None,
                    });
                    entries.push(MenuEntry {
                        key: BattleAction::Luck(i).choice_key(&choice.key),
                        label: format!("Luck attack {} (spend 1 luck)", enemy_name(&enemy.name)),
                        question: None,
                    });
                }
                entries.push(MenuEntry {
                    key: BattleAction::Run.choice_key(&choice.key),
                    label: "Run".to_string(),
                    question: None,
                });
            }
            _ => {
                let label = if choice.text.is_empty() {
                    choice.key.clone()
                } else {
                    choice.text.clone()
                };
                entries.push(MenuEntry {
                    key: choice.key.clone(),
                    label,
                    question: choice.prompt.as_ref().map(|p| p.question.clone()),
                });
            }
        }
    }
    entries
}

fn enemy_name(name: &str) -> &str {
    if name.is_empty() { "the enemy" } else { name }
}

fn status_line(state: &PlayerState) -> String {
    let mut line = format!(
        "STR {}  LUCK {}  HP {}",
        state.stats.strength, state.stats.luck, state.stats.health
    );
    for enemy in &state.enemies {
        line.push_str(&format!(
            "  |  {}: {} HP",
            enemy_name(&enemy.name),
            enemy.health
        ));
    }
    line
}

fn report(result: &StepResult) {
    if let Some(dice) = result.player_dice {
        println!("You roll {dice}");
    }
    if let Some(dice) = result.enemy_dice {
        println!("The enemy rolls {dice}");
    }
    if let Some(outcome) = result.outcome {
        println!("{}", outcome_line(outcome));
    }
    if let Some(message) = &result.message {
        println!("{}", message.yellow());
    }
}

fn outcome_line(outcome: Outcome) -> colored::ColoredString {
    match outcome {
        Outcome::Success => "Success!".green(),
        Outcome::Failure => "Failure.".red(),
        Outcome::Victory => "Victory!".green(),
        Outcome::Defeat => "You have fallen.".red(),
        Outcome::Tie => "Blades clash. Nobody lands a blow.".normal(),
        Outcome::PlayerHit => "You strike true.".green(),
        Outcome::EnemyHit => "You are hit!".red(),
    }
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next().and_then(|line| line.ok())
}
