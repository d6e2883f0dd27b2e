//! Data model for the scouting-report dataset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Positional cohort a percentile rank is computed against.
///
/// fbref publishes one percentile table per position a player qualifies
/// for; the variant order here is the canonical order used everywhere.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Position {
    GK,
    CB,
    FB,
    MF,
    AM,
    FW,
}

impl Position {
    /// All positions, in canonical order.
    pub const ALL: [Position; 6] = [
        Position::GK,
        Position::CB,
        Position::FB,
        Position::MF,
        Position::AM,
        Position::FW,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::CB => "CB",
            Position::FB => "FB",
            Position::MF => "MF",
            Position::AM => "AM",
            Position::FW => "FW",
        }
    }

    /// DOM id of this position's scouting section on a report page.
    pub fn section_id(&self) -> String {
        format!("div_scout_full_{}", self.code())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One merged statistic: the Per 90 rate plus a percentile rank for each
/// position the statistic applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    #[serde(rename = "Per 90")]
    pub per90: f64,
    #[serde(rename = "Percentile")]
    pub percentile: BTreeMap<Position, u8>,
}

/// One player's complete record, keyed in the dataset by fbref player id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub positions: Vec<Position>,
    pub mins: u32,
    pub team: String,
    pub nation: String,
    pub league: String,
    pub age: u8,
    pub profile: String,
    pub data: BTreeMap<String, StatEntry>,
}

/// Full run output: player id -> record. BTreeMap so repeated runs over the
/// same documents serialize byte-identically.
pub type Dataset = BTreeMap<String, PlayerRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_canonical_order() {
        let mut sorted = vec![Position::FW, Position::GK, Position::AM, Position::CB];
        sorted.sort();
        assert_eq!(
            sorted,
            vec![Position::GK, Position::CB, Position::AM, Position::FW]
        );
    }

    #[test]
    fn test_position_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Position::FW).unwrap(), "\"FW\"");
        let p: Position = serde_json::from_str("\"GK\"").unwrap();
        assert_eq!(p, Position::GK);
    }

    #[test]
    fn test_position_as_map_key() {
        let mut percentile = BTreeMap::new();
        percentile.insert(Position::FW, 80u8);
        percentile.insert(Position::AM, 70u8);
        let entry = StatEntry {
            per90: 0.5,
            percentile,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"Per 90":0.5,"Percentile":{"AM":70,"FW":80}}"#);

        let back: StatEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_section_id() {
        assert_eq!(Position::GK.section_id(), "div_scout_full_GK");
        assert_eq!(Position::FW.section_id(), "div_scout_full_FW");
    }
}
