//! Error types for the engine.
//!
//! Only structural problems are errors here: an unknown story or node,
//! or a malformed check configuration. Player-facing issues (invalid
//! choice, unmatched prompt answer, no destination) are soft failures
//! carried as messages on [`crate::StepResult`], never as `Err`.

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors indicating corrupt or mismatched story data.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The player's story ID does not match any loaded story.
    #[error("unknown story: {0}")]
    UnknownStory(String),

    /// The player's current node does not exist in the story.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A check has a roll/target combination the engine does not support.
    #[error("unsupported check: roll={roll} target={target}")]
    UnsupportedCheck {
        /// The dice expression the story asked for.
        roll: String,
        /// The comparison target the story asked for.
        target: String,
    },
}
