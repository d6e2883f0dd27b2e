//! Big-5 league player index parser.
//!
//! The index page lists every player in the five major leagues in one large
//! stats table. Cells are addressed by fbref's `data-stat` attributes; the
//! table repeats its header as in-body rows every 25 players, and a player
//! transferred mid-season appears once per club, so rows are deduplicated
//! by (name, age).

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::error::ScrapeError;

/// One player reference from the index table, metadata as displayed.
///
/// `nation` and `league` are raw cell text; the flag/tier prefix tokens are
/// stripped later when the record is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub rank: u32,
    pub name: String,
    pub age: u8,
    pub team: String,
    pub nation: String,
    pub league: String,
    pub minutes: u32,
    /// Site-relative profile href, e.g. `/en/players/e46012d4/Kevin-De-Bruyne`
    pub href: String,
}

impl PlayerRow {
    /// fbref player id and URL name slug from the profile href.
    pub fn id_and_slug(&self) -> Option<(String, String)> {
        let re = Regex::new(r"^/en/players/([0-9a-f]+)/([^/]+)$").unwrap();
        let caps = re.captures(&self.href)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }
}

/// Parser for the league index page
pub struct LeagueIndexParser;

impl LeagueIndexParser {
    /// Parse the index page into deduplicated player rows, document order.
    pub fn parse(html: &str) -> Result<Vec<PlayerRow>, ScrapeError> {
        let document = Html::parse_document(html);

        let table_selector = Selector::parse("table").unwrap();
        let Some(table) = document.select(&table_selector).next() else {
            return Err(ScrapeError::MalformedTable(
                "no player table on index page".to_string(),
            ));
        };

        let row_selector = Selector::parse("tbody tr").unwrap();
        let mut seen: HashSet<(String, u8)> = HashSet::new();
        let mut rows = Vec::new();

        for tr in table.select(&row_selector) {
            // Only the repeated in-body header rows and spacer rows may be
            // skipped; anything else that fails to parse is a real player
            // row with broken metadata and aborts the run.
            if Self::is_filler_row(&tr) {
                continue;
            }
            let Some(row) = Self::parse_row(&tr) else {
                let text = tr.text().collect::<String>();
                return Err(ScrapeError::MalformedTable(format!(
                    "unparseable index row: {}",
                    text.split_whitespace().collect::<Vec<_>>().join(" ")
                )));
            };
            if !seen.insert((row.name.clone(), row.age)) {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }

    /// Repeated header rows carry the "thead" class and "Rk" in the rank
    /// cell; spacer rows have no rank cell at all.
    fn is_filler_row(tr: &ElementRef) -> bool {
        let classes = tr.value().attr("class").unwrap_or("");
        if classes
            .split_whitespace()
            .any(|c| c == "thead" || c == "spacer")
        {
            return true;
        }
        match Self::cell_text(tr, "ranker") {
            Some(text) => text == "Rk",
            None => true,
        }
    }

    fn parse_row(tr: &ElementRef) -> Option<PlayerRow> {
        let rank = Self::cell_text(tr, "ranker")?.parse().ok()?;

        // Name and profile href come from the player cell's anchor.
        let link_selector = Selector::parse(r#"[data-stat="player"] a"#).unwrap();
        let link = tr.select(&link_selector).next()?;
        let name = link.text().collect::<String>().trim().to_string();
        let href = link.value().attr("href")?.to_string();
        if name.is_empty() || href.is_empty() {
            return None;
        }

        let age = parse_age(&Self::cell_text(tr, "age")?)?;
        let minutes = parse_minutes(&Self::cell_text(tr, "minutes")?)?;
        let nation = Self::cell_text(tr, "nationality")?;
        let team = Self::cell_text(tr, "team").or_else(|| Self::cell_text(tr, "squad"))?;
        let league = Self::cell_text(tr, "comp")?;

        Some(PlayerRow {
            rank,
            name,
            age,
            team,
            nation,
            league,
            minutes,
            href,
        })
    }

    fn cell_text(tr: &ElementRef, stat: &str) -> Option<String> {
        let selector = Selector::parse(&format!(r#"[data-stat="{}"]"#, stat)).unwrap();
        let text = tr
            .select(&selector)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// Age cells render either "27" or "27-154" (years-days); keep the years.
fn parse_age(text: &str) -> Option<u8> {
    text.split('-').next()?.trim().parse().ok()
}

/// Minutes cells carry thousands separators ("1,234").
fn parse_minutes(text: &str) -> Option<u32> {
    text.replace(',', "").parse().ok()
}
