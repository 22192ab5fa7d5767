//! Query error types
//!
//! Invalid requests. Empty outcomes (player not found, team did not play,
//! no qualifying bowlers) are not errors; they are variants of each query's
//! outcome type.

use thiserror::Error;

/// Errors that can occur while validating or running a query
#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    /// Player search text was empty after trimming
    #[error("Player name must not be empty")]
    EmptyPlayerName,

    /// Requested season lies outside the seasons on record
    #[error("Year {year} is outside the available seasons {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// The match table has no parseable seasons at all
    #[error("Dataset has no seasons")]
    NoSeasons,

    /// Leaderboard slug does not name a known board
    #[error("Unknown leaderboard: {0}")]
    UnknownBoard(String),

    /// Leaderboard size must be at least one
    #[error("Invalid limit: {0}")]
    InvalidLimit(usize),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
