//! Core data types for the match and delivery tables
//!
//! - `MatchRecord` / `DeliveryRecord`: rows as they appear in the CSV files
//! - `Match` / `Delivery`: normalized rows after season parsing, the season
//!   join and franchise renaming

use serde::{Deserialize, Deserializer, Serialize};

/// Columns the match table must carry
pub const MATCH_COLUMNS: &[&str] = &["id", "season", "team1", "team2", "winner", "player_of_match"];

/// Columns the delivery table must carry
pub const DELIVERY_COLUMNS: &[&str] = &[
    "match_id",
    "over",
    "ball",
    "batting_team",
    "bowling_team",
    "batter",
    "non_striker",
    "bowler",
    "batsman_runs",
    "total_runs",
    "is_wicket",
    "dismissal_kind",
    "player_dismissed",
];

/// Dismissal kinds credited to the bowler
pub const CREDITED_DISMISSALS: &[&str] = &[
    "bowled",
    "caught",
    "lbw",
    "stumped",
    "caught and bowled",
    "hit wicket",
];

/// Sentinel `winner` value for abandoned games
pub const NO_RESULT: &str = "No Result";

/// One row of the match CSV
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchRecord {
    pub id: u64,
    pub season: String,
    pub team1: String,
    pub team2: String,
    #[serde(deserialize_with = "optional_text")]
    pub winner: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub player_of_match: Option<String>,
}

/// One row of the delivery CSV
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeliveryRecord {
    pub match_id: u64,
    pub over: u32,
    pub ball: u32,
    pub batting_team: String,
    pub bowling_team: String,
    pub batter: String,
    pub non_striker: String,
    pub bowler: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    #[serde(deserialize_with = "flag")]
    pub is_wicket: bool,
    #[serde(deserialize_with = "optional_text")]
    pub dismissal_kind: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub player_dismissed: Option<String>,
}

/// A match after normalization
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Match {
    pub id: u64,
    /// Four-digit season, `None` when the raw value had no year token
    pub season: Option<i32>,
    pub team1: String,
    pub team2: String,
    pub winner: Option<String>,
    pub player_of_match: Option<String>,
}

impl Match {
    /// Whether the given (canonical) team took part
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }
}

/// A single ball after normalization
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Delivery {
    pub match_id: u64,
    /// Season inherited from the match; `None` for dangling match ids
    pub season: Option<i32>,
    /// 0-indexed over number
    pub over: u32,
    pub ball: u32,
    pub batting_team: String,
    pub bowling_team: String,
    pub batter: String,
    pub non_striker: String,
    pub bowler: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    pub is_wicket: bool,
    pub dismissal_kind: Option<String>,
    pub player_dismissed: Option<String>,
}

impl Delivery {
    /// Whether this ball is a dismissal credited to the bowler
    pub fn is_credited_wicket(&self) -> bool {
        self.dismissal_kind
            .as_deref()
            .map(|kind| CREDITED_DISMISSALS.contains(&kind))
            .unwrap_or(false)
    }

    pub fn is_six(&self) -> bool {
        self.batsman_runs == 6
    }
}

/// Empty cells and the literal `NA` both mean "missing"
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Accepts 0/1 as well as true/false
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid wicket flag: {}",
            other
        ))),
    }
}
