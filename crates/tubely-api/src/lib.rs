//! Tubely API Library
//!
//! This crate provides the HTTP handlers, auth helpers, and application setup.

// Module declarations
mod api_doc;
mod handlers;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod setup;
pub mod state;
pub mod utils;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::{AppState, UploadLimits};
