//! IPL Insights REST API
//!
//! HTTP API layer, built with Axum. Every handler takes the current dataset
//! snapshot from the cache and runs one query against it.
//!
//! # Endpoints
//!
//! ## Seasons
//! - `GET /api/v1/seasons` - Seasons on record
//!
//! ## Players
//! - `GET /api/v1/players?filter=` - Player directory
//! - `GET /api/v1/players/search?name=` - Free-text player search
//! - `GET /api/v1/players/:name` - Player stats by exact name
//!
//! ## Teams
//! - `GET /api/v1/teams` - Team directory
//! - `GET /api/v1/teams/:team/squad/:year` - Squad lookup
//!
//! ## Leaderboards
//! - `GET /api/v1/leaderboards` - Board catalog
//! - `GET /api/v1/leaderboards/:board?limit=` - One board
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Query outcomes are always 200 with a `status` field. Validation failures
//! are 400, unknown boards 404 and dataset load failures 503.
//!
//! # Example
//!
//! ```rust,ignore
//! use ipl_insights::api::{serve, ApiConfig, AppState};
//! use ipl_insights::data::{DataSource, DatasetCache, DatasetLoader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DataSource::new("matches.csv", "deliveries.csv");
//!     let cache = Arc::new(DatasetCache::new(source, DatasetLoader::default()));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(cache, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Season routes
        .route("/seasons", get(routes::seasons::list_seasons))
        // Player routes
        .route("/players", get(routes::players::list_players))
        .route("/players/search", get(routes::players::search_player))
        .route("/players/:name", get(routes::players::get_player))
        // Team routes
        .route("/teams", get(routes::teams::list_teams))
        .route("/teams/:team/squad/:year", get(routes::teams::get_squad))
        // Leaderboard routes
        .route("/leaderboards", get(routes::leaderboards::list_boards))
        .route("/leaderboards/:board", get(routes::leaderboards::get_board));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("IPL Insights API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("IPL Insights API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, DatasetCache, DatasetLoader, MatchRecord};
    use crate::test_support::{build, delivery_record, match_record};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn decided(id: u64, season: &str, team1: &str, team2: &str, winner: &str) -> MatchRecord {
        MatchRecord {
            winner: Some(winner.to_string()),
            player_of_match: Some("A".to_string()),
            ..match_record(id, season, team1, team2)
        }
    }

    fn create_test_app() -> Router {
        let dataset = build(
            vec![
                decided(1, "2008", "Delhi Daredevils", "Mumbai Indians", "Mumbai Indians"),
                decided(2, "2019", "Mumbai Indians", "Chennai Super Kings", "Mumbai Indians"),
            ],
            vec![
                delivery_record(1, "A", "B", 6),
                delivery_record(2, "A", "B", 1),
                delivery_record(2, "C", "B", 4),
            ],
        );
        build_router(AppState::with_dataset(dataset, ApiConfig::default()))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = fetch(create_test_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = fetch(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = fetch(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataset"], "ok");
        assert_eq!(body["stats"]["matches"], 2);
        assert_eq!(body["stats"]["deliveries"], 3);
    }

    #[tokio::test]
    async fn test_not_ready_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("m.csv"), dir.path().join("d.csv"));
        let cache = Arc::new(DatasetCache::new(source, DatasetLoader::default()));
        let app = build_router(AppState::new(cache, ApiConfig::default()));

        let (status, _) = fetch(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = fetch(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unhealthy");

        let (status, body) = fetch(app, "/api/v1/leaderboards/most-sixes").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "DATASET_UNAVAILABLE");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_seasons() {
        let (status, body) = fetch(create_test_app(), "/api/v1/seasons").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first"], 2008);
        assert_eq!(body["latest"], 2019);
    }

    #[tokio::test]
    async fn test_player_directory_filter() {
        let (status, body) = fetch(create_test_app(), "/api/v1/players?filter=c").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["players"], serde_json::json!(["C"]));
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn test_player_search() {
        let (status, body) = fetch(create_test_app(), "/api/v1/players/search?name=a").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "found");
        assert_eq!(body["player"], "A");
        assert_eq!(body["career"]["runs"], 7);

        let (status, body) = fetch(create_test_app(), "/api/v1/players/search?name=zz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "not_found");
    }

    #[tokio::test]
    async fn test_player_search_empty_name() {
        let (status, body) = fetch(create_test_app(), "/api/v1/players/search?name=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "QUERY_ERROR");
    }

    #[tokio::test]
    async fn test_player_by_name() {
        let (status, body) = fetch(create_test_app(), "/api/v1/players/B").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "found");
        assert_eq!(body["career"]["balls_bowled"], 3);
    }

    #[tokio::test]
    async fn test_teams() {
        let (status, body) = fetch(create_test_app(), "/api/v1/teams").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["teams"][0]["name"], "Chennai Super Kings");
    }

    #[tokio::test]
    async fn test_squad() {
        let (status, body) = fetch(
            create_test_app(),
            "/api/v1/teams/Mumbai%20Indians/squad/2019",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "squad");
        assert_eq!(body["players"], serde_json::json!(["A", "C"]));
    }

    #[tokio::test]
    async fn test_squad_did_not_play() {
        let (status, body) = fetch(
            create_test_app(),
            "/api/v1/teams/Chennai%20Super%20Kings/squad/2016",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "did_not_play");
    }

    #[tokio::test]
    async fn test_squad_year_out_of_range() {
        let (status, _) = fetch(
            create_test_app(),
            "/api/v1/teams/Mumbai%20Indians/squad/2030",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = fetch(
            create_test_app(),
            "/api/v1/teams/Mumbai%20Indians/squad/twenty",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_board_catalog() {
        let (status, body) = fetch(create_test_app(), "/api/v1/leaderboards").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["boards"].as_array().unwrap().len(), 8);
        assert_eq!(body["boards"][0]["board"], "team-wins");
        assert!(body["boards"][0].get("default_limit").is_none());
        assert_eq!(body["boards"][1]["default_limit"], 10);
    }

    #[tokio::test]
    async fn test_board() {
        let (status, body) = fetch(create_test_app(), "/api/v1/leaderboards/team-wins").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ranked");
        assert_eq!(body["entries"][0]["label"], "Mumbai Indians");
        assert_eq!(body["entries"][0]["value"], 2);

        let (status, body) =
            fetch(create_test_app(), "/api/v1/leaderboards/top-run-scorers?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entries"].as_array().unwrap().len(), 1);
        assert_eq!(body["entries"][0]["label"], "A");
    }

    #[tokio::test]
    async fn test_board_no_result() {
        let (status, body) = fetch(create_test_app(), "/api/v1/leaderboards/best-economy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_result");
    }

    #[tokio::test]
    async fn test_unknown_board() {
        let (status, body) = fetch(create_test_app(), "/api/v1/leaderboards/fastest-fifty").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_LEADERBOARD");
    }

    #[tokio::test]
    async fn test_board_invalid_limit() {
        let (status, _) = fetch(create_test_app(), "/api/v1/leaderboards/most-sixes?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            fetch(create_test_app(), "/api/v1/leaderboards/most-sixes?limit=1000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
