//! Test helpers: build AppState and router for integration tests.
//!
//! Each app gets its own in-memory SQLite database, a temp asset root, a temp
//! staging directory, and a recording fake in place of S3.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::make_jwt;
use tubely_api::setup::routes;
use tubely_api::{AppState, UploadLimits};
use tubely_core::models::Video;
use tubely_core::{Config, StorageBackend};
use tubely_db::{VideoRepository, VideoStore};
use tubely_storage::LocalStorage;
use uuid::Uuid;

use self::storage::RecordingStorage;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_BUCKET: &str = "tubely-test";
pub const TEST_REGION: &str = "us-east-2";

/// Test application: server plus handles on everything the handlers touch.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub videos: Arc<VideoRepository>,
    pub video_storage: Arc<RecordingStorage>,
    pub assets_dir: TempDir,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a video owned by `owner`.
    pub async fn seed_video(&self, owner: Uuid) -> Video {
        let video = Video::new(owner, "Boots", "A video about boots");
        self.videos
            .create_video(&video)
            .await
            .expect("Failed to seed video");
        video
    }

    pub async fn fetch_video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("Failed to fetch video")
            .expect("Video missing")
    }

    /// Files currently in the asset root.
    pub fn asset_files(&self) -> Vec<PathBuf> {
        list_files(&self.assets_dir)
    }

    /// Files currently in the staging directory.
    pub fn staged_files(&self) -> Vec<PathBuf> {
        list_files(&self.staging_dir)
    }
}

fn list_files(dir: &TempDir) -> Vec<PathBuf> {
    std::fs::read_dir(dir.path())
        .expect("Failed to read directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .collect()
}

/// Bearer token for `user_id`, valid for an hour.
pub fn token_for(user_id: Uuid) -> String {
    make_jwt(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1)).expect("Failed to sign JWT")
}

pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", token_for(user_id))
}

fn create_test_config(assets_root: PathBuf, staging_dir: PathBuf) -> Config {
    Config {
        server_port: 8091,
        public_host: "localhost".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 5,
        assets_root,
        staging_dir,
        storage_backend: StorageBackend::S3,
        s3_bucket: Some(TEST_BUCKET.to_string()),
        s3_region: Some(TEST_REGION.to_string()),
        s3_endpoint: None,
        aws_region: None,
        local_video_storage_path: None,
        local_video_storage_base_url: None,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
    }
}

/// Setup a test application with the production upload ceilings.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limits(UploadLimits::default()).await
}

/// Setup a test application with custom upload ceilings.
pub async fn setup_test_app_with_limits(limits: UploadLimits) -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    tubely_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let assets_dir = tempfile::tempdir().expect("Failed to create assets dir");
    let staging_dir = tempfile::tempdir().expect("Failed to create staging dir");
    let config = create_test_config(
        assets_dir.path().to_path_buf(),
        staging_dir.path().to_path_buf(),
    );

    let assets = Arc::new(
        LocalStorage::new(config.assets_root(), config.assets_base_url())
            .await
            .expect("Failed to create asset storage"),
    );
    let video_storage = Arc::new(RecordingStorage::new(TEST_BUCKET, TEST_REGION));
    let videos = Arc::new(VideoRepository::new(pool.clone()));

    let state = Arc::new(AppState {
        config,
        pool: pool.clone(),
        videos: videos.clone(),
        assets,
        video_storage: video_storage.clone(),
        limits,
    });

    let router = routes::setup_routes(state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        pool,
        videos,
        video_storage,
        assets_dir,
        staging_dir,
    }
}
