//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub assets: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check: database reachability (critical) and the asset root (informational).
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pool = state.pool.clone();
    let database = run_check(
        CHECK_TIMEOUT,
        async move { sqlx::query("SELECT 1").execute(&pool).await.map(drop) },
        "unhealthy",
    )
    .await;
    let overall_healthy = database == "healthy";

    let assets = state.assets.clone();
    let assets = run_check(
        CHECK_TIMEOUT,
        async move { assets.exists("health-check-non-existent-key").await.map(drop) },
        "degraded",
    )
    .await;

    if !overall_healthy {
        tracing::error!(database = %database, "Health check failed");
    }

    let response = HealthCheckResponse {
        status: if overall_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database,
        assets,
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
