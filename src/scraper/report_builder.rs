//! Assembles index metadata and a merged scouting report into one record.

use crate::scraper::parsers::{PlayerRow, ScoutReport};
use crate::scraper::profile_url;
use crate::types::PlayerRecord;

/// Combine an index row with the player's merged report. Pure assembly:
/// metadata passes through untouched apart from the nation and league
/// prefix tokens the index page adds for display.
pub fn build_player_record(row: &PlayerRow, report: ScoutReport) -> PlayerRecord {
    PlayerRecord {
        name: row.name.clone(),
        positions: report.positions,
        mins: row.minutes,
        team: row.team.clone(),
        nation: normalize_nation(&row.nation),
        league: normalize_league(&row.league),
        age: row.age,
        profile: profile_url(&row.href),
        data: report.data,
    }
}

/// "be BEL" -> "BEL": the index prefixes the country code with a flag token.
fn normalize_nation(raw: &str) -> String {
    raw.split_whitespace().last().unwrap_or_default().to_string()
}

/// "eng Premier League" -> "Premier League": drop the country prefix token.
fn normalize_league(raw: &str) -> String {
    raw.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
}
