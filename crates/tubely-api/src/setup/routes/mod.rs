//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::constants::ASSETS_PATH;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(state.config.cors_origins());
    let assets = ServeDir::new(state.config.assets_root());

    let app = Router::new()
        .merge(upload_routes())
        .merge(video_routes())
        .merge(public_routes())
        .nest_service(ASSETS_PATH, assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Upload routes enforce their own per-field ceilings while streaming, so the
/// default 2 MB body limit is lifted for them only.
fn upload_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/thumbnail_upload/{videoID}",
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .route(
            "/api/video_upload/{videoID}",
            post(handlers::video_upload::upload_video),
        )
        .layer(DefaultBodyLimit::disable())
}

fn video_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/videos/{videoID}", get(handlers::video_get::get_video))
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn setup_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    }
}
