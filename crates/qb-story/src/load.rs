//! Loading stories from JSON files and directories.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{StoryError, StoryResult};
use crate::types::Story;

/// Load a single story from a JSON file.
pub fn load_story(path: &Path) -> StoryResult<Story> {
    let bytes = fs::read(path).map_err(|source| StoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StoryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all `*.json` files from a directory.
///
/// Returns a map of story ID to story, where the ID is the file name
/// without its extension. Subdirectories and non-JSON files are skipped.
pub fn load_stories(dir: &Path) -> StoryResult<HashMap<String, Story>> {
    let entries = fs::read_dir(dir).map_err(|source| StoryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut stories = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if id.is_empty() {
            continue;
        }
        stories.insert(id.to_string(), load_story(&path)?);
    }
    Ok(stories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "title": "Test",
        "start": "intro",
        "nodes": { "intro": { "text": "Hello.", "ending": true } }
    }"#;

    #[test]
    fn load_single_story() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        fs::write(&path, MINIMAL).unwrap();

        let story = load_story(&path).unwrap();
        assert_eq!(story.title, "Test");
        assert_eq!(story.start, "intro");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_story(Path::new("/nonexistent/story.json")).unwrap_err();
        assert!(matches!(err, StoryError::Io { .. }));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_story(&path).unwrap_err();
        assert!(matches!(err, StoryError::Parse { .. }));
    }

    #[test]
    fn load_directory_keyed_by_file_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("demo.json"), MINIMAL).unwrap();
        fs::write(dir.path().join("cave.JSON"), MINIMAL).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a story").unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();

        let stories = load_stories(dir.path()).unwrap();
        assert_eq!(stories.len(), 2);
        assert!(stories.contains_key("demo"));
        assert!(stories.contains_key("cave"));
    }

    #[test]
    fn bundled_demo_story_parses_and_validates() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../stories/demo.json");
        let story = load_story(&path).unwrap();
        let issues = crate::validate::validate_story(&story);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn load_directory_propagates_parse_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "[]").unwrap();
        assert!(load_stories(dir.path()).is_err());
    }
}
