//! Configuration for fbref-scout.

use serde::{Deserialize, Serialize};

/// Scrape run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Output path for the assembled dataset
    #[serde(default = "default_output")]
    pub output: String,
    /// Directory for the raw-HTML cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Whether to use the cache at all
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Courtesy pause between live requests, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_output() -> String {
    "data/fbref/scouting_reports.json".to_string()
}

fn default_cache_dir() -> String {
    "data/cache/fbref".to_string()
}

fn default_use_cache() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_delay_ms() -> u64 {
    3000
}

fn default_user_agent() -> String {
    "fbref-scout/0.1".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            cache_dir: default_cache_dir(),
            use_cache: default_use_cache(),
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file, and
    /// FBREF_-prefixed environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("FBREF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
