use super::ui;
use crate::core::config::AppConfig;
use crate::core::filters::{ListQuery, filter_and_sort};
use crate::store::RecordStore;
use anyhow::Result;
use comfy_table::Cell;

pub fn run(store: &dyn RecordStore, config: &AppConfig, query: &ListQuery) -> Result<()> {
    let ideas = store.ideas(&config.user)?;
    let filtered = filter_and_sort(&ideas, query);

    if filtered.is_empty() {
        println!("No ideas match the current filters");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Title"),
        ui::header_cell("Status"),
        ui::header_cell("Category"),
        ui::header_cell("Tags"),
        ui::header_cell("Created"),
    ]);
    for idea in &filtered {
        let tags = if idea.tags.is_empty() {
            "-".to_string()
        } else {
            idea.tags.join(", ")
        };
        table.add_row(vec![
            Cell::new(&idea.title),
            Cell::new(idea.status.to_string()),
            ui::optional_cell(idea.category.as_deref()),
            Cell::new(tags),
            Cell::new(idea.created_at.date_naive().to_string()),
        ]);
    }
    println!("{table}");

    Ok(())
}
