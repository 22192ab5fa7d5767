//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset can be served)
//! - GET /health - Full health status with load statistics

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{DatasetHealth, HealthResponse};
use crate::api::state::AppState;
use crate::data::Dataset;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 once a dataset snapshot is available.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.cache.snapshot().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
///
/// Full health status with dataset statistics.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, dataset, stats, error) = match state.cache.snapshot().await {
        Ok(data) => {
            let stats = dataset_health(&data);
            let clean = stats.rows_failed == 0 && stats.unmapped_teams.is_empty();
            let status = if clean { "healthy" } else { "degraded" };
            (status, "ok", Some(stats), None)
        }
        Err(e) => ("unhealthy", "error", None, Some(e.to_string())),
    };

    Json(HealthResponse {
        status: status.to_string(),
        dataset: dataset.to_string(),
        stats,
        error,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn dataset_health(data: &Dataset) -> DatasetHealth {
    let report = &data.report;
    DatasetHealth {
        matches: report.matches,
        deliveries: report.deliveries,
        rows_failed: report.rows_failed,
        invalid_seasons: report.invalid_seasons,
        duplicate_matches: report.duplicate_matches,
        dangling_deliveries: report.dangling_deliveries,
        unmapped_teams: report.unmapped_teams.iter().cloned().collect(),
        loaded_at: data.loaded_at.to_rfc3339(),
    }
}
