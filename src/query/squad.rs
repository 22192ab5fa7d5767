//! Squad lookup
//!
//! Everyone who batted or bowled for a franchise in one season.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use super::error::{QueryError, QueryResult};
use crate::data::{Dataset, YearSpan, FIRST_SEASON};

/// Result of a squad lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SquadOutcome {
    Squad {
        team: String,
        year: i32,
        players: Vec<String>,
    },
    /// The franchise was not part of the league that season
    DidNotPlay {
        team: String,
        year: i32,
        active: Vec<YearSpan>,
    },
    /// No match of the franchise is recorded for the season
    NoMatches { team: String, year: i32 },
    /// Matches exist but no batter or bowler could be attributed
    NoSquadData { team: String, year: i32 },
}

/// Season bounds accepted by squad lookups: the first season through the latest on record
pub fn season_bounds(data: &Dataset) -> QueryResult<(i32, i32)> {
    let max = data.max_season().ok_or(QueryError::NoSeasons)?;
    Ok((FIRST_SEASON, max.max(FIRST_SEASON)))
}

/// Look up a franchise's squad for one season. Historical names are accepted
/// and resolved to the canonical franchise.
pub fn squad_for(data: &Dataset, team: &str, year: i32) -> QueryResult<SquadOutcome> {
    let (min, max) = season_bounds(data)?;
    if year < min || year > max {
        return Err(QueryError::YearOutOfRange { year, min, max });
    }

    let team = data.franchises.resolve(team.trim()).to_string();

    if !data.franchises.played_in(&team, year) {
        let active = data.franchises.active_spans(&team).to_vec();
        return Ok(SquadOutcome::DidNotPlay { team, year, active });
    }

    let match_ids: HashSet<u64> = data
        .matches
        .iter()
        .filter(|m| m.season == Some(year) && m.involves(&team))
        .map(|m| m.id)
        .collect();

    if match_ids.is_empty() {
        return Ok(SquadOutcome::NoMatches { team, year });
    }

    let mut players: BTreeSet<&str> = BTreeSet::new();
    for d in data
        .deliveries
        .iter()
        .filter(|d| match_ids.contains(&d.match_id))
    {
        if d.batting_team == team && !d.batter.is_empty() {
            players.insert(d.batter.as_str());
        }
        if d.bowling_team == team && !d.bowler.is_empty() {
            players.insert(d.bowler.as_str());
        }
    }

    if players.is_empty() {
        return Ok(SquadOutcome::NoSquadData { team, year });
    }

    let players = players.into_iter().map(str::to_string).collect();
    Ok(SquadOutcome::Squad {
        team,
        year,
        players,
    })
}
