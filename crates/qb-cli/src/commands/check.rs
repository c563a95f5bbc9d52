use std::path::Path;

use colored::Colorize;
use qb_story::validate_story;

pub fn run(dir: &Path) -> Result<(), String> {
    let stories = super::load_dir(dir)?;

    let mut ids: Vec<&String> = stories.keys().collect();
    ids.sort();

    let mut errors = 0;
    let mut warnings = 0;
    for id in ids {
        let issues = validate_story(&stories[id]);
        for issue in &issues {
            let line = format!("{id}: {issue}");
            if issue.is_error {
                errors += 1;
                eprintln!("  {}", line.red());
            } else {
                warnings += 1;
                eprintln!("  {}", line.yellow());
            }
        }
    }

    if errors > 0 {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    if warnings > 0 {
        println!(
            "  All checks passed ({} warning{}).",
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    } else {
        println!("  All checks passed.");
    }
    println!(
        "  {} stor{}, {} node{}",
        stories.len(),
        if stories.len() == 1 { "y" } else { "ies" },
        stories.values().map(|s| s.nodes.len()).sum::<usize>(),
        if stories.values().map(|s| s.nodes.len()).sum::<usize>() == 1 {
            ""
        } else {
            "s"
        },
    );

    Ok(())
}
