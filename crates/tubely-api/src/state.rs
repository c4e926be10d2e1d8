//! Application state shared by all handlers.

use sqlx::SqlitePool;
use std::sync::Arc;
use tubely_core::constants::{MAX_THUMBNAIL_SIZE_BYTES, MAX_VIDEO_SIZE_BYTES};
use tubely_core::Config;
use tubely_db::VideoStore;
use tubely_storage::Storage;

/// Per-field upload ceilings in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_thumbnail_bytes: u64,
    pub max_video_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_thumbnail_bytes: MAX_THUMBNAIL_SIZE_BYTES,
            max_video_bytes: MAX_VIDEO_SIZE_BYTES,
        }
    }
}

/// Everything a handler needs, passed explicitly through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pool used for health checks; record access goes through `videos`.
    pub pool: SqlitePool,
    pub videos: Arc<dyn VideoStore>,
    /// Thumbnail asset root.
    pub assets: Arc<dyn Storage>,
    /// Video object storage (S3 by default).
    pub video_storage: Arc<dyn Storage>,
    pub limits: UploadLimits,
}
