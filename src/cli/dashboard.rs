use super::ui;
use crate::core::config::AppConfig;
use crate::core::rates::{self, RateProvider};
use crate::core::renewals::{days_until, upcoming_renewals};
use crate::core::summary::{aggregate, idea_stats};
use crate::store::RecordStore;
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;

/// Renewal lookahead shown on the dashboard.
const RENEWAL_WINDOW_DAYS: u32 = 30;
/// Renewals displayed before the list is cut off.
const RENEWAL_DISPLAY_LIMIT: usize = 5;

pub async fn run(
    store: &dyn RecordStore,
    provider: &dyn RateProvider,
    config: &AppConfig,
) -> Result<()> {
    let subscriptions = store.subscriptions(&config.user)?;
    let ideas = store.ideas(&config.user)?;

    let currencies = rates::distinct_currencies(&subscriptions);
    let pb = ui::new_spinner("Fetching exchange rates...");
    let rate_map = rates::get_rates_map(provider, &config.currency, &currencies).await;
    pb.finish_and_clear();

    let costs = aggregate(&subscriptions, &rate_map);
    let stats = idea_stats(&ideas);

    println!("{}\n", ui::style_text("Dashboard", ui::StyleType::Title));

    let mut overview = ui::new_styled_table();
    overview.set_header(vec![
        ui::header_cell("Ideas"),
        ui::header_cell("Active Ideas"),
        ui::header_cell("Completed"),
        ui::header_cell("Active Subs"),
        ui::header_cell(&format!("Monthly ({})", config.currency)),
    ]);
    overview.add_row(vec![
        Cell::new(stats.total),
        Cell::new(stats.active),
        Cell::new(stats.completed),
        Cell::new(costs.active_count),
        Cell::new(format!("{:.2}", costs.total_monthly)),
    ]);
    println!("{overview}");

    let now = Utc::now();
    let due = upcoming_renewals(&subscriptions, now, RENEWAL_WINDOW_DAYS);
    if due.is_empty() {
        println!(
            "\n{}",
            ui::style_text(
                &format!("No renewals in the next {RENEWAL_WINDOW_DAYS} days"),
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    println!(
        "\n{}\n",
        ui::style_text("Upcoming Renewals", ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Renews In"),
        ui::header_cell("Date"),
        ui::header_cell("Cost"),
        ui::header_cell("Cycle"),
    ]);
    for sub in due.iter().take(RENEWAL_DISPLAY_LIMIT) {
        let days = days_until(sub.renewal_date, now);
        let plural = if days == 1 { "" } else { "s" };
        table.add_row(vec![
            Cell::new(&sub.name),
            Cell::new(format!("{days} day{plural}")),
            Cell::new(sub.renewal_date.to_string()),
            ui::amount_cell(sub.cost, sub.currency.as_deref().unwrap_or(&config.currency)),
            Cell::new(sub.billing_cycle.to_string()),
        ]);
    }
    println!("{table}");

    Ok(())
}
