//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Query outcomes from [`crate::query`] are serialized as-is; the types here
//! cover query strings, listings and health.

use serde::{Deserialize, Serialize};

use crate::query::{Board, TeamSummary};

// ============================================
// REQUEST PARAMETERS
// ============================================

/// `?name=` for free-text player search
#[derive(Debug, Deserialize)]
pub struct PlayerSearchParams {
    #[serde(default)]
    pub name: String,
}

/// `?filter=` narrowing the player directory
#[derive(Debug, Default, Deserialize)]
pub struct PlayerFilterParams {
    #[serde(default)]
    pub filter: Option<String>,
}

/// `?limit=` for leaderboards
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

// ============================================
// LISTING DTOs
// ============================================

/// Player directory response
#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<String>,
    pub total: usize,
}

/// Team directory response
#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    pub teams: Vec<TeamSummary>,
    pub total: usize,
}

/// One entry of the leaderboard catalog
#[derive(Debug, Serialize)]
pub struct BoardInfo {
    pub board: Board,
    pub title: &'static str,
    pub metric: &'static str,
    /// Size used without `?limit=`; absent when the board lists everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_limit: Option<usize>,
}

/// Leaderboard catalog response
#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<BoardInfo>,
    pub max_limit: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Load statistics of the current snapshot
#[derive(Debug, Serialize)]
pub struct DatasetHealth {
    pub matches: usize,
    pub deliveries: usize,
    pub rows_failed: usize,
    pub invalid_seasons: usize,
    pub duplicate_matches: usize,
    pub dangling_deliveries: usize,
    pub unmapped_teams: Vec<String>,
    pub loaded_at: String,
}

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Dataset status: ok, error
    pub dataset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DatasetHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
