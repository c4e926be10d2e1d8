//! Application setup and initialization
//!
//! Everything main.rs needs to go from a `Config` to a running router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::{AppState, UploadLimits};
use anyhow::Result;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let (assets, video_storage) = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        videos: Arc::new(VideoRepository::new(pool.clone())),
        pool,
        assets,
        video_storage,
        limits: UploadLimits::default(),
        config,
    });

    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
