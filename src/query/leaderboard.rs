//! Leaderboards
//!
//! Independent grouping + ranking queries over the whole dataset. None of
//! them depend on seasons, so deliveries with a dangling match id still count.

use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

use super::error::{QueryError, QueryResult};
use super::ranking::{rank, round2, RankedEntry, Tally};
use crate::data::{Dataset, NO_RESULT};

/// Default leaderboard size
pub const DEFAULT_LIMIT: usize = 10;

/// Minimum balls bowled (50 overs) to qualify for the economy board
pub const ECONOMY_MIN_BALLS: u64 = 300;

/// First death over, 0-indexed (overs 17-20 as usually numbered)
pub const DEATH_OVERS_START: u32 = 16;

/// The catalog of leaderboards
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Board {
    TeamWins,
    TopRunScorers,
    TopPartnerships,
    TopWicketTakers,
    BestEconomy,
    DeathOvers,
    PlayerOfMatch,
    MostSixes,
}

impl Board {
    pub fn all() -> &'static [Board] {
        &[
            Board::TeamWins,
            Board::TopRunScorers,
            Board::TopPartnerships,
            Board::TopWicketTakers,
            Board::BestEconomy,
            Board::DeathOvers,
            Board::PlayerOfMatch,
            Board::MostSixes,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Board::TeamWins => "team-wins",
            Board::TopRunScorers => "top-run-scorers",
            Board::TopPartnerships => "top-partnerships",
            Board::TopWicketTakers => "top-wicket-takers",
            Board::BestEconomy => "best-economy",
            Board::DeathOvers => "death-overs",
            Board::PlayerOfMatch => "player-of-match",
            Board::MostSixes => "most-sixes",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Board::TeamWins => "Most Successful Teams",
            Board::TopRunScorers => "Top Batsmen by Runs",
            Board::TopPartnerships => "Highest Partnerships by Runs",
            Board::TopWicketTakers => "Top Bowlers by Wickets",
            Board::BestEconomy => "Best Economy Rate (min 50 overs)",
            Board::DeathOvers => "Most Effective Death Bowlers (overs 17-20)",
            Board::PlayerOfMatch => "Most Player of the Match Awards",
            Board::MostSixes => "Most Sixes",
        }
    }

    /// Name of the ranked metric
    pub fn metric(&self) -> &'static str {
        match self {
            Board::TeamWins => "wins",
            Board::TopRunScorers | Board::TopPartnerships => "runs",
            Board::TopWicketTakers | Board::DeathOvers => "wickets",
            Board::BestEconomy => "economy",
            Board::PlayerOfMatch => "awards",
            Board::MostSixes => "sixes",
        }
    }

    /// Size used when the caller does not ask for one; team wins lists every team
    pub fn default_limit(&self) -> Option<usize> {
        match self {
            Board::TeamWins => None,
            _ => Some(DEFAULT_LIMIT),
        }
    }

    /// Run the board against a dataset
    pub fn compute(&self, data: &Dataset, limit: Option<usize>) -> QueryResult<BoardOutcome> {
        if limit == Some(0) {
            return Err(QueryError::InvalidLimit(0));
        }
        let limit = limit.or(self.default_limit());

        let entries = match self {
            Board::TeamWins => rank(team_wins(data, limit)),
            Board::TopRunScorers => rank(top_run_scorers(data, limit)),
            Board::TopPartnerships => rank(
                top_partnerships(data, limit)
                    .into_iter()
                    .map(|p| (p.label(), p.runs)),
            ),
            Board::TopWicketTakers => rank(top_wicket_takers(data, limit)),
            Board::BestEconomy => rank(
                best_economy(data, limit)
                    .into_iter()
                    .map(|row| (row.bowler, row.economy)),
            ),
            Board::DeathOvers => rank(death_over_wickets(data, limit)),
            Board::PlayerOfMatch => rank(player_of_match_awards(data, limit)),
            Board::MostSixes => rank(most_sixes(data, limit)),
        };

        if entries.is_empty() {
            return Ok(BoardOutcome::NoResult { board: *self });
        }

        Ok(BoardOutcome::Ranked(Leaderboard {
            board: *self,
            title: self.title().to_string(),
            metric: self.metric().to_string(),
            entries,
        }))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Board {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Board::all()
            .iter()
            .copied()
            .find(|board| board.slug() == wanted)
            .ok_or_else(|| QueryError::UnknownBoard(s.to_string()))
    }
}

/// A computed leaderboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Leaderboard {
    pub board: Board,
    pub title: String,
    pub metric: String,
    pub entries: Vec<RankedEntry>,
}

/// Either a ranking or an explicit "nothing qualified"
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoardOutcome {
    Ranked(Leaderboard),
    NoResult { board: Board },
}

/// Wins per team, excluding abandoned games
pub fn team_wins(data: &Dataset, limit: Option<usize>) -> Vec<(String, u64)> {
    let tally: Tally<&str> = data
        .matches
        .iter()
        .filter_map(|m| m.winner.as_deref())
        .filter(|winner| *winner != NO_RESULT)
        .collect();
    owned(tally.top(limit))
}

/// Career runs per batter
pub fn top_run_scorers(data: &Dataset, limit: Option<usize>) -> Vec<(String, u64)> {
    let mut tally = Tally::new();
    for d in &data.deliveries {
        tally.add(d.batter.as_str(), d.batsman_runs as u64);
    }
    owned(tally.top(limit))
}

/// Runs scored by a batter while a given partner was at the other end
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Partnership {
    pub batter: String,
    pub non_striker: String,
    pub runs: u64,
}

impl Partnership {
    pub fn label(&self) -> String {
        format!("{} & {}", self.batter, self.non_striker)
    }
}

/// Partnership runs, summed per match first and then across matches
pub fn top_partnerships(data: &Dataset, limit: Option<usize>) -> Vec<Partnership> {
    let mut per_match: Tally<(u64, &str, &str)> = Tally::new();
    for d in &data.deliveries {
        per_match.add(
            (d.match_id, d.batter.as_str(), d.non_striker.as_str()),
            d.batsman_runs as u64,
        );
    }

    let mut across: Tally<(&str, &str)> = Tally::new();
    for ((_, batter, non_striker), runs) in per_match.iter() {
        across.add((*batter, *non_striker), runs);
    }

    across
        .top(limit)
        .into_iter()
        .map(|((batter, non_striker), runs)| Partnership {
            batter: batter.to_string(),
            non_striker: non_striker.to_string(),
            runs,
        })
        .collect()
}

/// Credited wickets per bowler
pub fn top_wicket_takers(data: &Dataset, limit: Option<usize>) -> Vec<(String, u64)> {
    let tally: Tally<&str> = data
        .deliveries
        .iter()
        .filter(|d| d.is_credited_wicket())
        .map(|d| d.bowler.as_str())
        .collect();
    owned(tally.top(limit))
}

/// A qualifying bowler's economy figures
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EconomyRow {
    pub bowler: String,
    pub runs_conceded: u64,
    pub balls: u64,
    pub economy: f64,
}

/// Lowest economy rates among bowlers with at least 300 balls
pub fn best_economy(data: &Dataset, limit: Option<usize>) -> Vec<EconomyRow> {
    let mut totals: IndexMap<&str, (u64, u64)> = IndexMap::new();
    for d in &data.deliveries {
        let entry = totals.entry(d.bowler.as_str()).or_insert((0, 0));
        entry.0 += d.total_runs as u64;
        entry.1 += 1;
    }

    let mut rows: Vec<EconomyRow> = totals
        .into_iter()
        .filter(|(_, (_, balls))| *balls >= ECONOMY_MIN_BALLS)
        .map(|(bowler, (runs, balls))| EconomyRow {
            bowler: bowler.to_string(),
            runs_conceded: runs,
            balls,
            economy: round2(runs as f64 / (balls as f64 / 6.0)),
        })
        .collect();

    rows.sort_by(|a, b| a.economy.total_cmp(&b.economy));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Wickets of any kind taken from over 16 (0-indexed) onwards
pub fn death_over_wickets(data: &Dataset, limit: Option<usize>) -> Vec<(String, u64)> {
    let tally: Tally<&str> = data
        .deliveries
        .iter()
        .filter(|d| d.over >= DEATH_OVERS_START && d.is_wicket)
        .map(|d| d.bowler.as_str())
        .collect();
    owned(tally.top(limit))
}

/// Player of the match awards per player
pub fn player_of_match_awards(data: &Dataset, limit: Option<usize>) -> Vec<(String, u64)> {
    let tally: Tally<&str> = data
        .matches
        .iter()
        .filter_map(|m| m.player_of_match.as_deref())
        .collect();
    owned(tally.top(limit))
}

/// Sixes per batter
pub fn most_sixes(data: &Dataset, limit: Option<usize>) -> Vec<(String, u64)> {
    let tally: Tally<&str> = data
        .deliveries
        .iter()
        .filter(|d| d.is_six())
        .map(|d| d.batter.as_str())
        .collect();
    owned(tally.top(limit))
}

fn owned(rows: Vec<(&str, u64)>) -> Vec<(String, u64)> {
    rows.into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect()
}
