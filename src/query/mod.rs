//! IPL Insights Query Engine
//!
//! Side-effect-free queries over a loaded [`Dataset`](crate::data::Dataset):
//!
//! - **player**: per-season batting and bowling for one player
//! - **squad**: a franchise's players in one season
//! - **leaderboard**: the ranked boards (wins, runs, partnerships, wickets,
//!   economy, death overs, awards, sixes)
//! - **directory**: player, team and season listings
//!
//! Empty results are explicit outcome variants (`NotFound`, `DidNotPlay`,
//! `NoResult`, ...) rather than empty tables, so callers can tell them apart.
//!
//! # Example
//!
//! ```rust,ignore
//! use ipl_insights::query::{player_report, squad_for, Board, PlayerQuery};
//!
//! let sixes = Board::MostSixes.compute(&dataset, None)?;
//! let squad = squad_for(&dataset, "Chennai Super Kings", 2016)?; // DidNotPlay
//! let kohli = player_report(&dataset, PlayerQuery::Search("v kohli"))?;
//! ```

pub mod directory;
pub mod error;
pub mod leaderboard;
pub mod player;
pub mod ranking;
pub mod squad;

pub use directory::{SeasonSummary, TeamSummary};
pub use error::{QueryError, QueryResult};
pub use leaderboard::{
    best_economy, death_over_wickets, most_sixes, player_of_match_awards, team_wins,
    top_partnerships, top_run_scorers, top_wicket_takers, Board, BoardOutcome, EconomyRow,
    Leaderboard, Partnership, DEATH_OVERS_START, DEFAULT_LIMIT, ECONOMY_MIN_BALLS,
};
pub use player::{
    player_report, strike_rate, CareerTotals, PlayerOutcome, PlayerQuery, PlayerReport,
    SeasonBatting, SeasonBowling,
};
pub use ranking::{MetricValue, RankedEntry, Tally};
pub use squad::{season_bounds, squad_for, SquadOutcome};
