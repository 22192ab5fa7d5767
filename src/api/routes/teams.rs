//! Team Routes
//!
//! - GET /api/v1/teams - Team directory
//! - GET /api/v1/teams/:team/squad/:year - Squad of a franchise in one season

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::TeamListResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::query::{directory, squad_for, SquadOutcome};

/// GET /api/v1/teams
pub async fn list_teams(State(state): State<Arc<AppState>>) -> ApiResult<Json<TeamListResponse>> {
    let data = state.cache.snapshot().await?;
    let teams = directory::teams(&data);

    Ok(Json(TeamListResponse {
        total: teams.len(),
        teams,
    }))
}

/// GET /api/v1/teams/:team/squad/:year
///
/// Historical names are accepted. A year outside the recorded seasons is a
/// 400; a franchise that was not active that year is a `did_not_play` outcome.
pub async fn get_squad(
    State(state): State<Arc<AppState>>,
    Path((team, year)): Path<(String, String)>,
) -> ApiResult<Json<SquadOutcome>> {
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("Invalid year: {}", year)))?;

    if team.trim().is_empty() {
        return Err(ApiError::Validation("Team name must not be empty".to_string()));
    }

    let data = state.cache.snapshot().await?;
    let outcome = squad_for(&data, &team, year)?;
    Ok(Json(outcome))
}
