//! Player search
//!
//! Per-season batting and bowling summaries for one player. The player can
//! be looked up by free text (case-insensitive) or by exact stored name, as
//! picked from the player directory.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::error::{QueryError, QueryResult};
use super::ranking::round2;
use crate::data::{Dataset, Delivery};

/// How the player was identified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerQuery<'a> {
    /// Free text, matched case-insensitively against stored names
    Search(&'a str),
    /// A name taken from the player directory
    Exact(&'a str),
}

/// Runs per 100 balls, rounded to two decimals; `None` without balls faced
pub fn strike_rate(runs: u64, balls: u64) -> Option<f64> {
    if balls == 0 {
        return None;
    }
    Some(round2(runs as f64 / balls as f64 * 100.0))
}

/// One season at the crease
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonBatting {
    pub season: i32,
    pub runs: u64,
    pub balls: u64,
    pub matches: usize,
    pub strike_rate: f64,
}

/// One season with the ball
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonBowling {
    pub season: i32,
    pub balls: u64,
    pub wickets: u64,
}

/// Totals over every delivery, including those without a season
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CareerTotals {
    pub runs: u64,
    pub balls_faced: u64,
    pub strike_rate: Option<f64>,
    pub balls_bowled: u64,
    pub wickets: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerReport {
    pub player: String,
    pub batting: Vec<SeasonBatting>,
    pub bowling: Vec<SeasonBowling>,
    pub career: CareerTotals,
}

/// Result of a player lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayerOutcome {
    Found(PlayerReport),
    /// Free-text search matched no stored name
    NotFound { query: String },
    /// The player never batted or bowled
    NoData { player: String },
}

#[derive(Default)]
struct BattingAcc {
    runs: u64,
    balls: u64,
    matches: HashSet<u64>,
}

#[derive(Default)]
struct BowlingAcc {
    balls: u64,
    wickets: u64,
}

/// Look up a player's batting and bowling by season
pub fn player_report(data: &Dataset, query: PlayerQuery<'_>) -> QueryResult<PlayerOutcome> {
    let (raw, exact) = match query {
        PlayerQuery::Search(text) => (text, false),
        PlayerQuery::Exact(name) => (name, true),
    };
    let wanted = raw.trim();
    if wanted.is_empty() {
        return Err(QueryError::EmptyPlayerName);
    }

    let needle = wanted.to_lowercase();
    let is_player = |name: &str| {
        if exact {
            name == wanted
        } else {
            name.to_lowercase() == needle
        }
    };

    let mut display: Option<&str> = None;
    let mut batting: BTreeMap<i32, BattingAcc> = BTreeMap::new();
    let mut bowling: BTreeMap<i32, BowlingAcc> = BTreeMap::new();
    let mut career = CareerTotals::default();

    for d in &data.deliveries {
        if is_player(&d.batter) {
            display.get_or_insert(d.batter.as_str());
            record_batting(d, &mut batting, &mut career);
        }
        if is_player(&d.bowler) {
            display.get_or_insert(d.bowler.as_str());
            record_bowling(d, &mut bowling, &mut career);
        }
    }

    let Some(player) = display else {
        return Ok(if exact {
            PlayerOutcome::NoData {
                player: wanted.to_string(),
            }
        } else {
            PlayerOutcome::NotFound {
                query: wanted.to_string(),
            }
        });
    };

    career.strike_rate = strike_rate(career.runs, career.balls_faced);

    let batting = batting
        .into_iter()
        .filter_map(|(season, acc)| {
            // Every season entry holds at least one ball
            strike_rate(acc.runs, acc.balls).map(|sr| SeasonBatting {
                season,
                runs: acc.runs,
                balls: acc.balls,
                matches: acc.matches.len(),
                strike_rate: sr,
            })
        })
        .collect();

    let bowling = bowling
        .into_iter()
        .map(|(season, acc)| SeasonBowling {
            season,
            balls: acc.balls,
            wickets: acc.wickets,
        })
        .collect();

    Ok(PlayerOutcome::Found(PlayerReport {
        player: player.to_string(),
        batting,
        bowling,
        career,
    }))
}

fn record_batting(d: &Delivery, seasons: &mut BTreeMap<i32, BattingAcc>, career: &mut CareerTotals) {
    career.runs += d.batsman_runs as u64;
    career.balls_faced += 1;

    if let Some(season) = d.season {
        let acc = seasons.entry(season).or_default();
        acc.runs += d.batsman_runs as u64;
        acc.balls += 1;
        acc.matches.insert(d.match_id);
    }
}

fn record_bowling(d: &Delivery, seasons: &mut BTreeMap<i32, BowlingAcc>, career: &mut CareerTotals) {
    let credited = d.is_credited_wicket() as u64;
    career.balls_bowled += 1;
    career.wickets += credited;

    if let Some(season) = d.season {
        let acc = seasons.entry(season).or_default();
        acc.balls += 1;
        acc.wickets += credited;
    }
}
