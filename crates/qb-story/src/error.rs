//! Error types for story loading.

use std::path::PathBuf;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading story definitions.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// A story file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A story file is not valid JSON or does not match the story schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
}
