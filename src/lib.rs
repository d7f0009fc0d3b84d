pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use crate::core::ListQuery;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Dashboard,
    Subscriptions(ListQuery),
    Ideas(ListQuery),
    Renewals { window_days: u32 },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Subscription Tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = store::json::JsonStore::new(config.data_path()?);

    // Shared rate cache, one batched fetch per command at most
    let rate_cache = Arc::new(Cache::new());
    let rates_config = config.providers.rates.clone().unwrap_or_default();
    let rate_provider = providers::exchange_rate_api::ExchangeRateApiProvider::new(
        &rates_config.base_url,
        Duration::from_secs(rates_config.timeout_secs),
        rate_cache,
    )?;

    match command {
        AppCommand::Dashboard => cli::dashboard::run(&store, &rate_provider, &config).await,
        AppCommand::Subscriptions(query) => {
            cli::subscriptions::run(&store, &rate_provider, &config, &query).await
        }
        AppCommand::Ideas(query) => cli::ideas::run(&store, &config, &query),
        AppCommand::Renewals { window_days } => cli::renewals::run(&store, &config, window_days),
    }
}
