//! HTML parsers for fbref.com pages.

pub mod league;
pub mod report;

pub use league::{LeagueIndexParser, PlayerRow};
pub use report::{ScoutReport, ScoutReportParser};
