//! Tubely database layer
//!
//! SQLite-backed repositories plus the embedded schema migrations.

pub mod db;

pub use db::{VideoRepository, VideoStore};

/// Schema migrations, embedded at compile time from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
