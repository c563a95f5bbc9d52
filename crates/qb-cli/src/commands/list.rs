use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let stories = super::load_dir(dir)?;

    let mut ids: Vec<&String> = stories.keys().collect();
    ids.sort();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Nodes", "Endings"]);

    for id in &ids {
        let story = &stories[*id];
        let title = if story.title.is_empty() {
            "(untitled)".to_string()
        } else {
            story.title.clone()
        };
        let endings = story.nodes.values().filter(|n| n.ending).count();
        table.add_row(vec![
            (*id).clone(),
            title,
            story.nodes.len().to_string(),
            endings.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} stor{}",
        ids.len(),
        if ids.len() == 1 { "y" } else { "ies" }
    );

    Ok(())
}
