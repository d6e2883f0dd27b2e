//! fbref-scout
//!
//! Scrapes per-player positional percentile data from fbref scouting-report
//! pages and assembles one JSON dataset across the Big-5 leagues.

mod cli;
mod config;
mod dataset;
mod error;
mod scraper;
mod types;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fbref_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            output,
            league_url,
            limit,
            no_cache,
        } => cli::run_scrape(output, league_url, limit, no_cache).await,
        Commands::Report {
            player_id,
            slug,
            no_cache,
        } => cli::run_report(player_id, slug, no_cache).await,
    }
}
