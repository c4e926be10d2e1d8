//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_asset_storage, create_video_storage, Storage};

/// Build the thumbnail asset storage and the video storage.
pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    tracing::info!("Initializing storage...");

    let assets = create_asset_storage(config)
        .await
        .context("Failed to initialize asset storage")?;
    let video_storage = create_video_storage(config)
        .await
        .context("Failed to initialize video storage")?;

    tokio::fs::create_dir_all(config.staging_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create staging directory {}",
                config.staging_dir().display()
            )
        })?;

    tracing::info!(
        assets_root = %config.assets_root().display(),
        staging_dir = %config.staging_dir().display(),
        video_backend = %video_storage.backend_type(),
        "Storage initialized successfully"
    );

    Ok((assets, video_storage))
}
