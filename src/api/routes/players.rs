//! Player Routes
//!
//! - GET /api/v1/players?filter= - Player directory
//! - GET /api/v1/players/search?name= - Free-text player search
//! - GET /api/v1/players/:name - Player stats by exact name

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{PlayerFilterParams, PlayerListResponse, PlayerSearchParams};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::query::{directory, player_report, PlayerOutcome, PlayerQuery};

/// GET /api/v1/players
///
/// Sorted list of every batter and bowler, optionally filtered.
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayerFilterParams>,
) -> ApiResult<Json<PlayerListResponse>> {
    let data = state.cache.snapshot().await?;
    let players = directory::players(&data, params.filter.as_deref());

    Ok(Json(PlayerListResponse {
        total: players.len(),
        players,
    }))
}

/// GET /api/v1/players/search
///
/// Case-insensitive search; an empty name is rejected with 400.
pub async fn search_player(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayerSearchParams>,
) -> ApiResult<Json<PlayerOutcome>> {
    let data = state.cache.snapshot().await?;
    let outcome = player_report(&data, PlayerQuery::Search(&params.name))?;
    Ok(Json(outcome))
}

/// GET /api/v1/players/:name
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<PlayerOutcome>> {
    let data = state.cache.snapshot().await?;
    let outcome = player_report(&data, PlayerQuery::Exact(&name))?;
    Ok(Json(outcome))
}
