//! Season Routes
//!
//! - GET /api/v1/seasons - Seasons on record and the accepted squad range

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::query::{directory, SeasonSummary};

/// GET /api/v1/seasons
pub async fn list_seasons(State(state): State<Arc<AppState>>) -> ApiResult<Json<SeasonSummary>> {
    let data = state.cache.snapshot().await?;
    Ok(Json(directory::seasons(&data)))
}
