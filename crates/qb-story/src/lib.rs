//! Story graph data model for Questbook: nodes, choices, checks, effects,
//! battles, and prompts.
//!
//! This crate defines the data that the engine consumes. Stories are plain
//! serde data: construct one programmatically or deserialize it from JSON
//! with [`load::load_story`].

/// Error types used throughout the crate.
pub mod error;
/// Loading stories from JSON files and directories.
pub mod load;
/// Story graph types: stories, nodes, choices, and their parts.
pub mod types;
/// Structural validation of story graphs.
pub mod validate;

/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export loader functions.
pub use load::{load_stories, load_story};
/// Re-export the story graph types.
pub use types::{
    Answer, Battle, Check, Choice, Effect, Enemy, Node, Prompt, StatKind, Story,
};
/// Re-export validation types.
pub use validate::{ValidationIssue, validate_story};
