//! Web scraper module for fbref.com
//!
//! Provides the HTTP client, raw-HTML cache, and page parsers.

pub mod cache;
pub mod client;
pub mod parsers;
pub mod report_builder;

pub use cache::{Cache, CacheCategory};
pub use client::FbrefClient;

/// Base URL for fbref.com
pub const BASE_URL: &str = "https://fbref.com";

/// Build a player's scouting-report URL
pub fn scout_report_url(player_id: &str, slug: &str) -> String {
    format!(
        "{}/en/players/{}/scout/365_euro/{}-Scouting-Report",
        BASE_URL, player_id, slug
    )
}

/// Big-5 European leagues player stats index URL
pub fn league_index_url() -> String {
    format!(
        "{}/en/comps/Big5/stats/players/Big-5-European-Leagues-Stats",
        BASE_URL
    )
}

/// Absolute profile URL from a site-relative href
pub fn profile_url(href: &str) -> String {
    format!("{}{}", BASE_URL, href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scout_report_url() {
        let url = scout_report_url("e46012d4", "Kevin-De-Bruyne");
        assert_eq!(
            url,
            "https://fbref.com/en/players/e46012d4/scout/365_euro/Kevin-De-Bruyne-Scouting-Report"
        );
    }

    #[test]
    fn test_league_index_url() {
        assert_eq!(
            league_index_url(),
            "https://fbref.com/en/comps/Big5/stats/players/Big-5-European-Leagues-Stats"
        );
    }

    #[test]
    fn test_profile_url() {
        assert_eq!(
            profile_url("/en/players/e46012d4/Kevin-De-Bruyne"),
            "https://fbref.com/en/players/e46012d4/Kevin-De-Bruyne"
        );
    }
}
