//! # IPL Insights
//!
//! IPL match and ball-by-ball analytics: loads the league's match and
//! delivery tables, normalizes seasons and franchise names, and answers
//! player, squad and leaderboard questions over HTTP or from the command line.
//!
//! ## Modules
//!
//! - [`data`]: CSV loading, normalization and the reloadable dataset cache
//! - [`query`]: Player search, squad lookup, leaderboards and directories
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ipl_insights::data::{DataSource, DatasetLoader};
//! use ipl_insights::query::{squad_for, Board, PlayerQuery, player_report};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::default().load(&DataSource::new(
//!         "matches_cleaned.csv",
//!         "deliveries_cleaned.csv",
//!     ))?;
//!
//!     let sixes = Board::MostSixes.compute(&dataset, Some(5))?;
//!     let squad = squad_for(&dataset, "Kings XI Punjab", 2014)?;
//!     let player = player_report(&dataset, PlayerQuery::Search("kohli"))?;
//!
//!     println!("{:?}\n{:?}\n{:?}", sixes, squad, player);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod logging;
pub mod query;

// Re-export top-level types for convenience
pub use data::{
    DataError, DataResult, DataSource, Dataset, DatasetCache, DatasetLoader, FranchiseTable,
    LoadReport,
};

pub use query::{
    player_report, squad_for, Board, BoardOutcome, PlayerOutcome, PlayerQuery, QueryError,
    QueryResult, SquadOutcome,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DataConfig, LoggingConfig};

/// Record builders shared by the unit tests
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::data::{Dataset, DeliveryRecord, FranchiseTable, MatchRecord};

    pub fn match_record(id: u64, season: &str, team1: &str, team2: &str) -> MatchRecord {
        MatchRecord {
            id,
            season: season.to_string(),
            team1: team1.to_string(),
            team2: team2.to_string(),
            winner: None,
            player_of_match: None,
        }
    }

    /// A legal ball from Mumbai Indians' innings against Chennai Super Kings
    pub fn delivery_record(match_id: u64, batter: &str, bowler: &str, runs: u32) -> DeliveryRecord {
        DeliveryRecord {
            match_id,
            over: 0,
            ball: 1,
            batting_team: "Mumbai Indians".to_string(),
            bowling_team: "Chennai Super Kings".to_string(),
            batter: batter.to_string(),
            non_striker: "NS".to_string(),
            bowler: bowler.to_string(),
            batsman_runs: runs,
            total_runs: runs,
            is_wicket: false,
            dismissal_kind: None,
            player_dismissed: None,
        }
    }

    pub fn wicket(match_id: u64, batter: &str, bowler: &str, kind: &str, over: u32) -> DeliveryRecord {
        DeliveryRecord {
            over,
            is_wicket: true,
            dismissal_kind: Some(kind.to_string()),
            player_dismissed: Some(batter.to_string()),
            ..delivery_record(match_id, batter, bowler, 0)
        }
    }

    pub fn build(matches: Vec<MatchRecord>, deliveries: Vec<DeliveryRecord>) -> Dataset {
        build_with(Arc::new(FranchiseTable::builtin()), matches, deliveries)
    }

    pub fn build_with(
        franchises: Arc<FranchiseTable>,
        matches: Vec<MatchRecord>,
        deliveries: Vec<DeliveryRecord>,
    ) -> Dataset {
        Dataset::from_records(matches, deliveries, franchises)
    }
}
