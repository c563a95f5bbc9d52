//! Structural validation of story graphs.
//!
//! Checks that every destination referenced by a choice, check branch,
//! battle, or prompt answer points at an existing node, and flags a few
//! authoring mistakes the engine would otherwise surface as soft
//! failures at play time.

use crate::types::{Choice, Node, Story};

/// A problem found while validating a story.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The node ID where the issue was found.
    pub node: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.node, self.message)
    }
}

/// Validate a story graph.
///
/// Returns a list of issues found; an empty list means the story is
/// structurally sound. Validation is advisory; the engine itself stays
/// fail-soft at play time.
pub fn validate_story(story: &Story) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !story.has_node(&story.start) {
        issues.push(ValidationIssue {
            node: story.start.clone(),
            message: "start node does not exist".to_string(),
            is_error: true,
        });
    }

    for (node_id, node) in &story.nodes {
        validate_node(story, node_id, node, &mut issues);
    }

    issues.sort_by(|a, b| a.node.cmp(&b.node).then(a.message.cmp(&b.message)));
    issues
}

fn validate_node(story: &Story, node_id: &str, node: &Node, issues: &mut Vec<ValidationIssue>) {
    for (i, choice) in node.choices.iter().enumerate() {
        if choice.key.is_empty() {
            issues.push(ValidationIssue {
                node: node_id.to_string(),
                message: format!("choice #{i} has an empty key"),
                is_error: true,
            });
        }
        if node.choices[..i].iter().any(|c| c.key == choice.key) {
            issues.push(ValidationIssue {
                node: node_id.to_string(),
                message: format!("duplicate choice key '{}'", choice.key),
                is_error: true,
            });
        }
        validate_choice(story, node_id, choice, issues);
    }
}

fn validate_choice(story: &Story, node_id: &str, choice: &Choice, issues: &mut Vec<ValidationIssue>) {
    let mut check_dest = |dest: &str, what: &str| {
        if !dest.is_empty() && !story.has_node(dest) {
            issues.push(ValidationIssue {
                node: node_id.to_string(),
                message: format!("choice '{}': {what} points at unknown node '{dest}'", choice.key),
                is_error: true,
            });
        }
    };

    check_dest(&choice.next, "next");
    check_dest(&choice.on_success_next, "on_success_next");
    check_dest(&choice.on_failure_next, "on_failure_next");

    if let Some(battle) = &choice.battle {
        check_dest(&battle.on_victory_next, "battle on_victory_next");
        check_dest(&battle.on_defeat_next, "battle on_defeat_next");
    }
    if let Some(prompt) = &choice.prompt {
        check_dest(&prompt.default_next, "prompt default_next");
        for answer in &prompt.answers {
            check_dest(&answer.next, "prompt answer next");
        }
    }

    if let Some(check) = &choice.check {
        if check.roll != "2d6" || check.target != "stat" {
            issues.push(ValidationIssue {
                node: node_id.to_string(),
                message: format!(
                    "choice '{}': unsupported check (roll={}, target={})",
                    choice.key, check.roll, check.target
                ),
                is_error: true,
            });
        }
    }

    if let Some(battle) = &choice.battle {
        if battle.enemies.is_empty() && battle.enemy_name.is_empty() && battle.enemy_health <= 0 {
            issues.push(ValidationIssue {
                node: node_id.to_string(),
                message: format!("choice '{}': battle has no enemies", choice.key),
                is_error: false,
            });
        }
    }

    if let Some(prompt) = &choice.prompt {
        let no_route = prompt.answers.iter().all(|a| a.next.is_empty())
            && prompt.default_next.is_empty()
            && choice.next.is_empty();
        if no_route {
            issues.push(ValidationIssue {
                node: node_id.to_string(),
                message: format!("choice '{}': prompt has no routable answers", choice.key),
                is_error: false,
            });
        }
    }
}
