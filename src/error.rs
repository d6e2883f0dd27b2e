//! Failure taxonomy for the scraping pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The report page has no usable percentile tables. Expected for players
    /// below the minutes threshold; the run skips them and continues.
    #[error("no percentile data in scouting report")]
    InsufficientData,

    /// A scouting section exists but its table does not have the expected
    /// shape. Fatal: the page layout has drifted from what we parse.
    #[error("malformed percentile table: {0}")]
    MalformedTable(String),

    /// Network or HTTP failure. Fatal for the whole run.
    #[error("fetch failed")]
    Fetch(#[source] anyhow::Error),
}
