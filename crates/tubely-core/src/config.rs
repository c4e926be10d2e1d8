//! Configuration module
//!
//! Server, database, asset root, staging and object storage settings, loaded
//! from the environment (and `.env` when present).

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::ASSETS_PATH;
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Host used when building thumbnail URLs.
    pub public_host: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub assets_root: PathBuf,
    pub staging_dir: PathBuf,
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_video_storage_path: Option<String>,
    pub local_video_storage_base_url: Option<String>,
    pub environment: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("PLATFORM")
            .or_else(|_| env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "dev".to_string());
        let is_production = is_production_name(&environment);

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .or_else(|| env::var("DB_PATH").ok().map(|p| format!("sqlite://{}", p)))
            .unwrap_or_else(|| "sqlite://tubely.db".to_string());

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(s) => s.parse()?,
            Err(_) => StorageBackend::S3,
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            public_host: env::var("PUBLIC_HOST").unwrap_or_else(|_| "localhost".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            database_url,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            assets_root: env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assets")),
            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION").ok().filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            aws_region: env::var("AWS_REGION").ok().filter(|s| !s.is_empty()),
            local_video_storage_path: env::var("LOCAL_VIDEO_STORAGE_PATH").ok(),
            local_video_storage_base_url: env::var("LOCAL_VIDEO_STORAGE_BASE_URL").ok(),
            environment,
            cors_origins,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a SQLite connection string (sqlite://...)"
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_video_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_VIDEO_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_video_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_VIDEO_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Base URL for thumbnails: `http://<host>:<port>/assets`.
    pub fn assets_base_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.public_host, self.server_port, ASSETS_PATH
        )
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    /// `S3_REGION`, falling back to `AWS_REGION`.
    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_video_storage_path(&self) -> Option<&str> {
        self.local_video_storage_path.as_deref()
    }

    pub fn local_video_storage_base_url(&self) -> Option<&str> {
        self.local_video_storage_base_url.as_deref()
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}
