//! Full-run dataset assembly and persistence.
//!
//! One player at a time: fetch the report page (cache first), parse and
//! merge its position tables, attach the index metadata, accumulate.
//! Players without percentile data are expected and skipped; anything else
//! aborts the run before any output is written.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::scraper::parsers::{PlayerRow, ScoutReportParser};
use crate::scraper::report_builder::build_player_record;
use crate::scraper::{scout_report_url, Cache, CacheCategory, FbrefClient};
use crate::types::{Dataset, PlayerRecord};

pub struct DatasetBuilder<'a> {
    client: &'a FbrefClient,
    cache: Option<&'a Cache>,
    delay: Duration,
}

impl<'a> DatasetBuilder<'a> {
    /// `cache` of `None` disables caching; `delay` is the courtesy pause
    /// between live requests.
    pub fn new(client: &'a FbrefClient, cache: Option<&'a Cache>, delay: Duration) -> Self {
        Self {
            client,
            cache,
            delay,
        }
    }

    /// Collect a merged record for every player row, keyed by player id.
    pub async fn collect(&self, rows: &[PlayerRow]) -> Result<Dataset> {
        let total = rows.len();
        let mut dataset = Dataset::new();

        for (i, row) in rows.iter().enumerate() {
            let Some((player_id, slug)) = row.id_and_slug() else {
                anyhow::bail!("malformed profile href for {}: {}", row.name, row.href);
            };

            info!("({}/{}) {}", i + 1, total, row.name);
            debug!("rk {} -> {}", row.rank, row.href);
            match self.player_record(row, &player_id, &slug).await {
                Ok(record) => {
                    dataset.insert(player_id, record);
                }
                Err(ScrapeError::InsufficientData) => {
                    debug!("{}: no percentile data, skipping", row.name);
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to scrape {}", row.name));
                }
            }
        }

        Ok(dataset)
    }

    async fn player_record(
        &self,
        row: &PlayerRow,
        player_id: &str,
        slug: &str,
    ) -> Result<PlayerRecord, ScrapeError> {
        let html = self.fetch_report(player_id, slug).await?;
        let report = ScoutReportParser::parse(&html)?;
        Ok(build_player_record(row, report))
    }

    async fn fetch_report(&self, player_id: &str, slug: &str) -> Result<String, ScrapeError> {
        if let Some(cache) = self.cache {
            if let Some(html) = cache.get(CacheCategory::ScoutReport, player_id) {
                return Ok(html);
            }
        }

        let url = scout_report_url(player_id, slug);
        let html = self.client.fetch(&url).await.map_err(ScrapeError::Fetch)?;

        if let Some(cache) = self.cache {
            if let Err(e) = cache.set(CacheCategory::ScoutReport, player_id, &html) {
                warn!("failed to cache report for {}: {}", player_id, e);
            }
        }
        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }

        Ok(html)
    }
}

/// Write the dataset as one JSON object keyed by player id.
pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output dir {}", dir.display()))?;
        }
    }
    let json = serde_json::to_string(dataset).context("failed to serialize dataset")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, StatEntry};
    use std::collections::BTreeMap;

    fn index_row(rank: u32, name: &str, href: &str) -> PlayerRow {
        PlayerRow {
            rank,
            name: name.to_string(),
            age: 27,
            team: "Some Club".to_string(),
            nation: "be BEL".to_string(),
            league: "eng Premier League".to_string(),
            minutes: 1500,
            href: href.to_string(),
        }
    }

    #[tokio::test]
    async fn test_collect_skips_players_without_percentile_data() {
        // Both report pages are pre-cached so no request goes out. One has
        // no percentile sections at all; the other is a normal FW report.
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());
        cache
            .set(
                CacheCategory::ScoutReport,
                "aaaa1111",
                "<html><body><div id=\"info\"><h1>Goalless Keeper</h1></div></body></html>",
            )
            .unwrap();
        cache
            .set(
                CacheCategory::ScoutReport,
                "bbbb2222",
                r#"<html><body>
<div id="div_scout_full_FW">
<table id="scout_full_FW">
<thead>
<tr class="over_header"><th colspan="3">Standard Stats</th></tr>
<tr><th>Statistic</th><th>Per 90</th><th>Percentile</th></tr>
</thead>
<tbody>
<tr><th>Goals</th><td>0.5</td><td>80</td></tr>
</tbody>
</table>
</div>
</body></html>"#,
            )
            .unwrap();

        let client = FbrefClient::new("fbref-scout/test", 5).unwrap();
        let builder = DatasetBuilder::new(&client, Some(&cache), Duration::ZERO);
        let rows = vec![
            index_row(1, "Goalless Keeper", "/en/players/aaaa1111/Goalless-Keeper"),
            index_row(2, "Busy Striker", "/en/players/bbbb2222/Busy-Striker"),
        ];

        let dataset = builder.collect(&rows).await.unwrap();

        assert_eq!(dataset.len(), 1);
        let record = &dataset["bbbb2222"];
        assert_eq!(record.name, "Busy Striker");
        assert_eq!(record.positions, vec![Position::FW]);
        assert_eq!(record.data["Goals"].percentile[&Position::FW], 80);
    }

    #[tokio::test]
    async fn test_collect_rejects_malformed_href() {
        let client = FbrefClient::new("fbref-scout/test", 5).unwrap();
        let builder = DatasetBuilder::new(&client, None, Duration::ZERO);
        let rows = vec![index_row(
            1,
            "Misfiled Player",
            "/en/squads/b8fd03ef/Manchester-City-Stats",
        )];

        assert!(builder.collect(&rows).await.is_err());
    }

    fn sample_dataset() -> Dataset {
        let mut percentile = BTreeMap::new();
        percentile.insert(Position::FW, 80u8);
        let mut data = BTreeMap::new();
        data.insert(
            "Goals".to_string(),
            StatEntry {
                per90: 0.5,
                percentile,
            },
        );

        let mut dataset = Dataset::new();
        dataset.insert(
            "e46012d4".to_string(),
            PlayerRecord {
                name: "Some Player".to_string(),
                positions: vec![Position::FW],
                mins: 1500,
                team: "Some Club".to_string(),
                nation: "BEL".to_string(),
                league: "Premier League".to_string(),
                age: 27,
                profile: "https://fbref.com/en/players/e46012d4/Some-Player".to_string(),
                data,
            },
        );
        dataset
    }

    #[test]
    fn test_save_dataset_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/scouting_reports.json");

        save_dataset(&path, &sample_dataset()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value["e46012d4"];
        assert_eq!(record["name"], "Some Player");
        assert_eq!(record["positions"][0], "FW");
        assert_eq!(record["mins"], 1500);
        assert_eq!(record["data"]["Goals"]["Per 90"], 0.5);
        assert_eq!(record["data"]["Goals"]["Percentile"]["FW"], 80);
    }

    #[test]
    fn test_save_dataset_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        let dataset = sample_dataset();

        save_dataset(&a, &dataset).unwrap();
        save_dataset(&b, &dataset).unwrap();
        assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
    }
}
