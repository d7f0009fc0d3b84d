use super::ui;
use crate::core::config::AppConfig;
use crate::core::renewals::{days_until, upcoming_renewals};
use crate::store::RecordStore;
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;

pub fn run(store: &dyn RecordStore, config: &AppConfig, window_days: u32) -> Result<()> {
    let subscriptions = store.subscriptions(&config.user)?;

    let now = Utc::now();
    let due = upcoming_renewals(&subscriptions, now, window_days);
    if due.is_empty() {
        println!("No renewals in the next {window_days} days");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Renews In"),
        ui::header_cell("Date"),
        ui::header_cell("Cost"),
        ui::header_cell("Cycle"),
        ui::header_cell("Category"),
    ]);
    for sub in &due {
        let days = days_until(sub.renewal_date, now);
        let plural = if days == 1 { "" } else { "s" };
        table.add_row(vec![
            Cell::new(&sub.name),
            Cell::new(format!("{days} day{plural}")),
            Cell::new(sub.renewal_date.to_string()),
            ui::amount_cell(sub.cost, sub.currency.as_deref().unwrap_or(&config.currency)),
            Cell::new(sub.billing_cycle.to_string()),
            ui::optional_cell(sub.category.as_deref()),
        ]);
    }
    println!("{table}");

    Ok(())
}
