mod combine;
mod output;
mod search;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shopdir_ingest::{CsvSource, ShopStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopdir-cli")]
#[command(about = "Shop directory CSV ingestion tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse the shop CSV and emit normalized records as JSON
    Parse {
        /// CSV path or http(s) URL; defaults to `SHOPDIR_CSV_SOURCE`
        #[arg(long)]
        source: Option<String>,
        /// Write JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Combine every CSV export in a directory into one file
    Combine {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, default_value = "all_shops.csv")]
        output: PathBuf,
    },
    /// Filter parsed shops the way the listing page does
    Search(search::SearchArgs),
}

impl Commands {
    /// Only commands that load shop data read `SHOPDIR_*` settings.
    fn needs_config(&self) -> bool {
        matches!(self, Commands::Parse { .. } | Commands::Search(_))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.command {
        Some(command) if command.needs_config() => {
            Some(shopdir_core::load_app_config_from_env()?)
        }
        _ => None,
    };
    let log_level = config.as_ref().map_or("info", |c| c.log_level.as_str());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Parse {
            source,
            output,
            pretty,
        }) => {
            let config = config.as_ref().context("configuration not loaded")?;
            let store = load_store(config, source.as_deref()).await?;
            output::write_json(output.as_deref(), store.shops(), pretty).await?;
        }
        Some(Commands::Combine { dir, output }) => {
            combine::run_combine(&dir, &output).await?;
        }
        Some(Commands::Search(args)) => {
            let config = config.as_ref().context("configuration not loaded")?;
            let store = load_store(config, args.source.as_deref()).await?;
            let filter = args.to_filter(config.default_radius_miles);
            let mut matches = store.filter(&filter);
            if let Some(limit) = args.limit {
                matches.truncate(limit);
            }
            tracing::info!(matches = matches.len(), "search complete");
            output::write_json(args.output.as_deref(), &matches, args.pretty).await?;
        }
        None => println!("shopdir-cli: run with --help for commands"),
    }

    Ok(())
}

/// Build a store for `source` (or the configured default) and load it once.
async fn load_store(
    config: &shopdir_core::AppConfig,
    source: Option<&str>,
) -> anyhow::Result<ShopStore> {
    let mut store = match source {
        Some(raw) => ShopStore::new(
            CsvSource::parse(raw),
            config.fetch_timeout_secs,
            &config.user_agent,
        )?,
        None => ShopStore::from_config(config)?,
    };
    let summary = store.refresh().await?;
    tracing::info!(
        source = %store.source(),
        rows_seen = summary.rows_seen,
        shops = summary.rows_accepted,
        "parsed shops"
    );
    Ok(store)
}
