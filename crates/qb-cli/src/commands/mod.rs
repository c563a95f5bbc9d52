pub mod check;
pub mod list;
pub mod play;

use std::collections::HashMap;
use std::path::Path;

use qb_story::Story;

/// Load all story files from a directory, failing when none are found.
fn load_dir(dir: &Path) -> Result<HashMap<String, Story>, String> {
    let stories = qb_story::load_stories(dir).map_err(|e| e.to_string())?;
    if stories.is_empty() {
        return Err(format!("no story files found in {}", dir.display()));
    }
    Ok(stories)
}
