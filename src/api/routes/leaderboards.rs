//! Leaderboard Routes
//!
//! - GET /api/v1/leaderboards - Board catalog
//! - GET /api/v1/leaderboards/:board?limit= - One ranked board

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{BoardInfo, BoardListResponse, LimitParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::{ApiConfig, AppState};
use crate::query::{Board, BoardOutcome};

/// GET /api/v1/leaderboards
pub async fn list_boards(State(state): State<Arc<AppState>>) -> Json<BoardListResponse> {
    let boards = Board::all()
        .iter()
        .map(|board| BoardInfo {
            board: *board,
            title: board.title(),
            metric: board.metric(),
            default_limit: board.default_limit().map(|_| state.config.default_limit),
        })
        .collect();

    Json(BoardListResponse {
        boards,
        max_limit: state.config.max_limit,
    })
}

/// GET /api/v1/leaderboards/:board
///
/// Unknown boards are 404. `limit` must lie in `1..=max_limit`.
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Json<BoardOutcome>> {
    let board: Board = slug.parse()?;
    let limit = effective_limit(board, params.limit, &state.config)?;

    let data = state.cache.snapshot().await?;
    let outcome = board.compute(&data, limit)?;
    Ok(Json(outcome))
}

fn effective_limit(
    board: Board,
    requested: Option<usize>,
    config: &ApiConfig,
) -> ApiResult<Option<usize>> {
    match requested {
        Some(0) => Err(ApiError::Validation("limit must be at least 1".to_string())),
        Some(n) if n > config.max_limit => Err(ApiError::Validation(format!(
            "limit must not exceed {}",
            config.max_limit
        ))),
        Some(n) => Ok(Some(n)),
        None => Ok(board.default_limit().map(|_| config.default_limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        let config = ApiConfig::default();

        assert_eq!(effective_limit(Board::MostSixes, None, &config).unwrap(), Some(10));
        assert_eq!(effective_limit(Board::TeamWins, None, &config).unwrap(), None);
        assert_eq!(effective_limit(Board::TeamWins, Some(3), &config).unwrap(), Some(3));
        assert!(effective_limit(Board::MostSixes, Some(0), &config).is_err());
        assert!(effective_limit(Board::MostSixes, Some(101), &config).is_err());
    }
}
