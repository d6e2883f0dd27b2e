//! Scouting-report parser: position detection, percentile-table extraction,
//! and the per-position merge.
//!
//! A report page carries one `div#div_scout_full_<POS>` section per position
//! the player has enough minutes for. Each section holds the full percentile
//! table for that cohort, recognizable by its two-level column header whose
//! leaf row is Statistic / Per 90 / Percentile. Sections are read in one
//! pass, so a position and its table can never get out of step.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ScrapeError;
use crate::types::{Position, StatEntry};

/// Raw per-position table: statistic name -> (Per 90, percentile).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTable {
    pub position: Position,
    pub stats: BTreeMap<String, RawStat>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawStat {
    pub per90: f64,
    pub percentile: u8,
}

/// Merged output of one report page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutReport {
    pub positions: Vec<Position>,
    pub data: BTreeMap<String, StatEntry>,
}

/// fbref marks this row inconsistently across position tables.
const EXCLUDED_STATS: [&str; 1] = ["Passes Blocked"];

/// Parser for scouting-report pages
pub struct ScoutReportParser;

impl ScoutReportParser {
    /// Parse a report page into its merged scouting report.
    ///
    /// Returns `InsufficientData` when the page has no percentile sections
    /// or they yield no usable statistics; the caller skips such players.
    pub fn parse(html: &str) -> Result<ScoutReport, ScrapeError> {
        let document = Html::parse_document(html);
        let tables = Self::position_tables(&document)?;
        Self::merge(&tables)
    }

    /// Positions with a dedicated percentile section, in canonical order.
    pub fn detect_positions(document: &Html) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|p| Self::section(document, *p).is_some())
            .collect()
    }

    /// One pass over the document: every detected position paired with the
    /// percentile table extracted from its own section.
    pub fn position_tables(document: &Html) -> Result<Vec<PositionTable>, ScrapeError> {
        let positions = Self::detect_positions(document);
        if positions.is_empty() {
            return Err(ScrapeError::InsufficientData);
        }

        let mut tables = Vec::with_capacity(positions.len());
        for position in positions {
            // Detection just found the section, so it is present here.
            if let Some(block) = Self::section(document, position) {
                tables.push(Self::extract_table(block, position)?);
            }
        }
        Ok(tables)
    }

    /// Fold position tables into one statistic-keyed mapping.
    ///
    /// The first table is canonical: it alone decides which statistics exist
    /// and supplies their Per 90 values. Later tables only contribute
    /// percentile ranks for statistics the first table already has.
    pub fn merge(tables: &[PositionTable]) -> Result<ScoutReport, ScrapeError> {
        let first = tables.first().ok_or(ScrapeError::InsufficientData)?;

        let mut data = BTreeMap::new();
        for (stat, raw) in &first.stats {
            let mut percentile = BTreeMap::new();
            for table in tables {
                if let Some(r) = table.stats.get(stat) {
                    percentile.insert(table.position, r.percentile);
                }
            }
            data.insert(
                stat.clone(),
                StatEntry {
                    per90: raw.per90,
                    percentile,
                },
            );
        }

        // A first table that filtered down to nothing means the page holds
        // no rankable data for this player.
        if data.is_empty() {
            return Err(ScrapeError::InsufficientData);
        }

        Ok(ScoutReport {
            positions: tables.iter().map(|t| t.position).collect(),
            data,
        })
    }

    fn section<'a>(document: &'a Html, position: Position) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(&format!("div#{}", position.section_id())).unwrap();
        document.select(&selector).next()
    }

    /// Extract the percentile table from one position section.
    fn extract_table(
        block: ElementRef,
        position: Position,
    ) -> Result<PositionTable, ScrapeError> {
        let table_selector = Selector::parse("table").unwrap();
        let header_row_selector = Selector::parse("thead tr").unwrap();
        let cell_selector = Selector::parse("th, td").unwrap();

        for table in block.select(&table_selector) {
            let header_rows: Vec<_> = table.select(&header_row_selector).collect();
            // A single-level header means a bio panel or match log, not a
            // percentile summary table.
            if header_rows.len() < 2 {
                continue;
            }

            // Collapse the grouped header to its leaf row.
            let leaf: Vec<String> = header_rows[header_rows.len() - 1]
                .select(&cell_selector)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();

            let stat_idx = leaf.iter().position(|c| c == "Statistic");
            let per90_idx = leaf.iter().position(|c| c == "Per 90");
            let pct_idx = leaf.iter().position(|c| c == "Percentile");
            let (Some(stat_idx), Some(per90_idx), Some(pct_idx)) =
                (stat_idx, per90_idx, pct_idx)
            else {
                return Err(ScrapeError::MalformedTable(format!(
                    "{} table is missing Statistic/Per 90/Percentile columns",
                    position
                )));
            };

            let stats = Self::parse_rows(table, stat_idx, per90_idx, pct_idx);
            return Ok(PositionTable { position, stats });
        }

        Err(ScrapeError::MalformedTable(format!(
            "no percentile table in {} section",
            position
        )))
    }

    /// Walk the table body, keeping only usable statistic rows.
    ///
    /// Dropped along the way: rows with a missing or empty cell, repeats of
    /// a statistic already seen (fbref duplicates rows around its in-body
    /// group headers), rows whose percentile is not a rankable integer, and
    /// the known-bad rows in `EXCLUDED_STATS`.
    fn parse_rows(
        table: ElementRef,
        stat_idx: usize,
        per90_idx: usize,
        pct_idx: usize,
    ) -> BTreeMap<String, RawStat> {
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("th, td").unwrap();

        let mut stats = BTreeMap::new();
        for row in table.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();

            let (Some(stat), Some(per90), Some(pct)) = (
                cells.get(stat_idx),
                cells.get(per90_idx),
                cells.get(pct_idx),
            ) else {
                continue;
            };
            if stat.is_empty() || per90.is_empty() {
                continue;
            }
            if EXCLUDED_STATS.contains(&stat.as_str()) {
                continue;
            }
            let Some(percentile) = parse_percentile(pct) else {
                continue;
            };
            let Some(per90) = parse_per90(per90) else {
                continue;
            };
            // First occurrence wins.
            stats
                .entry(stat.clone())
                .or_insert(RawStat { per90, percentile });
        }
        stats
    }
}

/// Parse a percentile cell into a rank, or `None` for a non-rankable
/// placeholder (em-dash, blank, out-of-range value).
pub fn parse_percentile(text: &str) -> Option<u8> {
    text.trim().parse::<u8>().ok().filter(|v| *v <= 100)
}

/// Parse a Per 90 cell; percentage-style statistics carry a trailing '%'.
fn parse_per90(text: &str) -> Option<f64> {
    text.trim().trim_end_matches('%').parse::<f64>().ok()
}
