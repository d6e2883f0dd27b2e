//! CLI commands for fbref-scout.
//!
//! `scrape` runs the full league index -> per-player pipeline; `report`
//! fetches and prints one player's merged report for inspection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dataset::{save_dataset, DatasetBuilder};
use crate::scraper::parsers::{LeagueIndexParser, ScoutReportParser};
use crate::scraper::{league_index_url, scout_report_url, Cache, CacheCategory, FbrefClient};

#[derive(Parser)]
#[command(name = "fbref-scout")]
#[command(version, about = "Scrape fbref scouting-report percentiles into one JSON dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape every player on the league index into a JSON dataset
    Scrape {
        /// Output path override
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// League index URL override
        #[arg(long)]
        league_url: Option<String>,

        /// Only process the first N players
        #[arg(long)]
        limit: Option<usize>,

        /// Bypass the HTML cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Fetch and print one player's merged scouting report
    Report {
        /// fbref player id (e.g. e46012d4)
        player_id: String,

        /// URL name slug (e.g. Kevin-De-Bruyne)
        slug: String,

        /// Bypass the HTML cache
        #[arg(long)]
        no_cache: bool,
    },
}

/// Run the full scrape.
pub async fn run_scrape(
    output: Option<PathBuf>,
    league_url: Option<String>,
    limit: Option<usize>,
    no_cache: bool,
) -> Result<()> {
    let config = AppConfig::load()?;
    let client = FbrefClient::new(&config.scrape.user_agent, config.scrape.timeout_secs)?;
    let cache = Cache::new(&config.scrape.cache_dir);
    let use_cache = config.scrape.use_cache && !no_cache;

    let url = league_url.unwrap_or_else(league_index_url);
    info!("Fetching league index: {}", url);
    let index_html = match use_cache
        .then(|| cache.get(CacheCategory::LeagueIndex, "big5"))
        .flatten()
    {
        Some(html) => html,
        None => {
            let html = client.fetch(&url).await?;
            if use_cache {
                if let Err(e) = cache.set(CacheCategory::LeagueIndex, "big5", &html) {
                    warn!("failed to cache league index: {}", e);
                }
            }
            html
        }
    };

    let mut rows = LeagueIndexParser::parse(&index_html)?;
    info!("League index: {} players", rows.len());
    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    let builder = DatasetBuilder::new(
        &client,
        use_cache.then_some(&cache),
        Duration::from_millis(config.scrape.delay_ms),
    );
    let dataset = builder.collect(&rows).await?;
    info!(
        "Collected {} scouting reports ({} players skipped)",
        dataset.len(),
        rows.len() - dataset.len()
    );

    let output = output.unwrap_or_else(|| PathBuf::from(&config.scrape.output));
    save_dataset(&output, &dataset)?;
    info!("Wrote {}", output.display());

    Ok(())
}

/// Fetch, merge, and print a single player's report as JSON.
pub async fn run_report(player_id: String, slug: String, no_cache: bool) -> Result<()> {
    let config = AppConfig::load()?;
    let client = FbrefClient::new(&config.scrape.user_agent, config.scrape.timeout_secs)?;
    let cache = Cache::new(&config.scrape.cache_dir);
    let use_cache = config.scrape.use_cache && !no_cache;

    let html = match use_cache
        .then(|| cache.get(CacheCategory::ScoutReport, &player_id))
        .flatten()
    {
        Some(html) => html,
        None => {
            let html = client.fetch(&scout_report_url(&player_id, &slug)).await?;
            if use_cache {
                if let Err(e) = cache.set(CacheCategory::ScoutReport, &player_id, &html) {
                    warn!("failed to cache report: {}", e);
                }
            }
            html
        }
    };

    let report = ScoutReportParser::parse(&html)
        .with_context(|| format!("failed to parse scouting report for {}", player_id))?;

    let out = serde_json::json!({
        "id": player_id,
        "positions": report.positions,
        "data": report.data,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);

    Ok(())
}
