use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use subtrack::core::{ListQuery, SortKey};
use subtrack::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display idea and subscription overview
    Dashboard,
    /// List subscriptions with cost totals
    Subscriptions {
        /// Case-insensitive substring match on name and description
        #[arg(long)]
        search: Option<String>,
        /// Filter by status (active, cancelled, paused)
        #[arg(long)]
        status: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Sort order: newest, oldest, name, cost-high, cost-low, renewal
        #[arg(long)]
        sort: Option<String>,
    },
    /// List ideas
    Ideas {
        /// Case-insensitive substring match on title and description
        #[arg(long)]
        search: Option<String>,
        /// Filter by status (draft, active, completed, archived)
        #[arg(long)]
        status: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Sort order: newest, oldest, title
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show subscriptions renewing soon
    Renewals {
        /// Lookahead window in days
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

fn list_query(
    search: Option<String>,
    status: Option<String>,
    category: Option<String>,
    sort: Option<String>,
) -> Result<ListQuery> {
    Ok(ListQuery {
        search,
        status,
        category,
        sort: match sort {
            Some(s) => s.parse()?,
            None => SortKey::default(),
        },
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Dashboard) => {
            subtrack::run_command(subtrack::AppCommand::Dashboard, config_path).await
        }
        Some(Commands::Subscriptions {
            search,
            status,
            category,
            sort,
        }) => {
            let query = list_query(search, status, category, sort)?;
            subtrack::run_command(subtrack::AppCommand::Subscriptions(query), config_path).await
        }
        Some(Commands::Ideas {
            search,
            status,
            category,
            sort,
        }) => {
            let query = list_query(search, status, category, sort)?;
            subtrack::run_command(subtrack::AppCommand::Ideas(query), config_path).await
        }
        Some(Commands::Renewals { days }) => {
            subtrack::run_command(
                subtrack::AppCommand::Renewals { window_days: days },
                config_path,
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = subtrack::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
user: "me"
currency: "INR"

providers:
  rates:
    base_url: "https://api.exchangerate-api.com"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
