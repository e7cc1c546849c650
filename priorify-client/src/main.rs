//! priorify - headless priority assignment
//!
//! Lists the category universe, shows the priorities stored by the backend,
//! and assigns + submits a new priority set from the command line.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use priorify_client::labels::resolve_assignment;
use priorify_client::report::render_assignment;
use priorify_client::{HttpPriorityApi, PrioritySession};
use priorify_common::config::{ClientConfig, ConfigResolver};
use priorify_common::{CategoryUniverse, PriorityAction};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "priorify", version, about = "Assign and submit schedule category priorities")]
struct Cli {
    /// Backend base URL (overrides PRIORIFY_API_URL and config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path (overrides PRIORIFY_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every category in display order
    Categories,
    /// Show the priorities currently stored by the backend
    Show,
    /// Assign priorities and submit them
    Set {
        /// High priority categories, most important first (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        high: Vec<String>,
        /// Low priority categories, least important last (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        low: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigResolver::new()
        .with_api_url(cli.api_url.clone())
        .with_log_level(cli.log_level.clone())
        .with_config_file(cli.config.clone())
        .resolve()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting priorify v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("PRIORIFY_REVISION"),
        env!("PRIORIFY_BUILT_AT"),
        env!("PRIORIFY_PROFILE")
    );

    // Resolution runs before the subscriber exists; report its fallbacks now
    for warning in &config.warnings {
        warn!("{}", warning);
    }

    let universe = CategoryUniverse::standard();

    match cli.command {
        Command::Categories => {
            for (i, category) in universe.iter().enumerate() {
                println!("{:>2}. {}", i + 1, category);
            }
            Ok(())
        }
        Command::Show => show(universe, &config).await,
        Command::Set { high, low } => set(universe, &config, &high, &low).await,
    }
}

async fn show(universe: CategoryUniverse, config: &ClientConfig) -> Result<()> {
    let api = HttpPriorityApi::new(config)?;
    let mut session = PrioritySession::new(universe, api, config.completion_rule);

    if let Err(e) = session.hydrate().await {
        error!("Failed to load priorities: {}", e);
        return Err(e.into());
    }

    println!("{}", render_assignment(session.store()));
    Ok(())
}

async fn set(
    universe: CategoryUniverse,
    config: &ClientConfig,
    high: &[String],
    low: &[String],
) -> Result<()> {
    // Reject typos and repeats before anything is sent
    let (high, low) = resolve_assignment(&universe, high, low)?;

    let api = HttpPriorityApi::new(config)?;
    let mut session = PrioritySession::new(universe, api, config.completion_rule);

    for category in high {
        session.dispatch(PriorityAction::MoveToHigh {
            category,
            index: None,
        });
    }
    for category in low {
        session.dispatch(PriorityAction::MoveToLow {
            category,
            index: None,
        });
    }

    let summary = render_assignment(session.store());
    if let Err(e) = session.submit().await {
        eprintln!("{}", e.user_message());
        eprintln!("{}", summary);
        bail!(e);
    }

    println!("{}", summary);
    println!("Priorities saved.");
    Ok(())
}
