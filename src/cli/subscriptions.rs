use super::ui;
use crate::core::config::AppConfig;
use crate::core::filters::{ListQuery, filter_and_sort};
use crate::core::rates::{self, RateProvider};
use crate::core::summary::aggregate;
use crate::store::RecordStore;
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(
    store: &dyn RecordStore,
    provider: &dyn RateProvider,
    config: &AppConfig,
    query: &ListQuery,
) -> Result<()> {
    let subscriptions = store.subscriptions(&config.user)?;
    let filtered = filter_and_sort(&subscriptions, query);

    if filtered.is_empty() {
        println!("No subscriptions match the current filters");
        return Ok(());
    }

    let currencies = rates::distinct_currencies(&filtered);
    let pb = ui::new_spinner("Fetching exchange rates...");
    let rate_map = rates::get_rates_map(provider, &config.currency, &currencies).await;
    pb.finish_and_clear();

    // Totals cover the filtered view, matching what the table shows.
    let costs = aggregate(&filtered, &rate_map);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Cost"),
        ui::header_cell("Cycle"),
        ui::header_cell("Renewal"),
        ui::header_cell("Status"),
        ui::header_cell("Category"),
    ]);
    for sub in &filtered {
        table.add_row(vec![
            Cell::new(&sub.name),
            ui::amount_cell(sub.cost, sub.currency.as_deref().unwrap_or(&config.currency)),
            Cell::new(sub.billing_cycle.to_string()),
            Cell::new(sub.renewal_date.to_string()),
            Cell::new(sub.status.to_string()),
            ui::optional_cell(sub.category.as_deref()),
        ]);
    }
    println!("{table}");

    println!(
        "\n{} active | {} ({}): {}  {} ({}): {}",
        costs.active_count,
        ui::style_text("Monthly", ui::StyleType::TotalLabel),
        config.currency,
        ui::style_text(&format!("{:.2}", costs.total_monthly), ui::StyleType::TotalValue),
        ui::style_text("Yearly", ui::StyleType::TotalLabel),
        config.currency,
        ui::style_text(&format!("{:.2}", costs.total_yearly), ui::StyleType::TotalValue),
    );

    Ok(())
}
