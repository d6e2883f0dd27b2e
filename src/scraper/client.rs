//! HTTP fetch collaborator for fbref.com.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Thin reqwest wrapper: user agent, timeout, and a status check.
pub struct FbrefClient {
    client: Client,
}

impl FbrefClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a page body, failing on any non-success status.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request failed: {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} for {}", response.status(), url);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {}", url))?;
        debug!("fetched {} bytes", body.len());

        Ok(body)
    }
}
