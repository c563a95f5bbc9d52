//! Typed-answer prompt resolution.
//!
//! Prompts match free-text input against accepted answers after
//! normalization. Matching is exact-after-normalization only, with no
//! fuzzy matching and no scoring; the first answer that matches wins.

use qb_story::{Answer, Prompt};

/// Message shown when the player submits an empty answer.
pub const MSG_EMPTY_ANSWER: &str = "Please enter an answer.";
/// Message shown when no answer matches and no default route exists.
pub const MSG_NO_MATCH: &str = "That does not seem right.";

/// The result of resolving a prompt answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResolution {
    /// The answer routed to this node ID.
    Route(String),
    /// The answer was rejected; the message is shown to the player and
    /// the state stays unchanged.
    Rejected(String),
}

/// Normalize a free-text answer: lowercase, strip everything that is
/// not a letter, digit, or whitespace, then collapse whitespace runs to
/// single spaces and trim the ends.
pub fn normalize_answer(answer: &str) -> String {
    let kept: String = answer
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a prompt against the player's typed answer.
///
/// Answers are tried in story order; the first whose `match`/`matches`
/// normalizes to the same string as the input routes to its `next`.
/// Unmatched input falls back to the prompt's `default_next`, then the
/// caller-supplied fallback destination, then a rejection.
pub fn resolve_prompt(prompt: &Prompt, answer: &str, fallback_next: &str) -> PromptResolution {
    let normalized = normalize_answer(answer);
    if normalized.is_empty() {
        return PromptResolution::Rejected(failure_message(prompt, MSG_EMPTY_ANSWER));
    }

    for candidate in &prompt.answers {
        if candidate.next.is_empty() {
            continue;
        }
        if answer_matches(candidate, &normalized) {
            return PromptResolution::Route(candidate.next.clone());
        }
    }

    if !prompt.default_next.is_empty() {
        return PromptResolution::Route(prompt.default_next.clone());
    }
    if !fallback_next.is_empty() {
        return PromptResolution::Route(fallback_next.to_string());
    }
    PromptResolution::Rejected(failure_message(prompt, MSG_NO_MATCH))
}

fn answer_matches(candidate: &Answer, normalized: &str) -> bool {
    if !candidate.match_text.is_empty() && normalize_answer(&candidate.match_text) == normalized {
        return true;
    }
    candidate
        .matches
        .iter()
        .any(|m| normalize_answer(m) == normalized)
}

fn failure_message(prompt: &Prompt, fallback: &str) -> String {
    if prompt.failure_message.is_empty() {
        fallback.to_string()
    } else {
        prompt.failure_message.clone()
    }
}
