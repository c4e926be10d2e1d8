#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Create the video storage backend based on configuration
pub async fn create_video_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_video_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_VIDEO_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_video_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError(
                        "LOCAL_VIDEO_STORAGE_BASE_URL not configured".to_string(),
                    )
                })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

/// Create the thumbnail asset storage: always the local asset root.
#[cfg(feature = "storage-local")]
pub async fn create_asset_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.assets_root(), config.assets_base_url()).await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-local"))]
pub async fn create_asset_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "Asset storage requires the storage-local feature".to_string(),
    ))
}
