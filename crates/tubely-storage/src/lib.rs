//! Tubely Storage Library
//!
//! Storage abstraction and its backends: the local filesystem (the thumbnail
//! asset root, or a development video store) and S3 (video uploads).
//!
//! # Storage key format
//!
//! Keys are flat file names relative to the backend root, e.g. `<video_id>.mp4`
//! or `<token>.png`. Keys must not be empty, contain `..`, or start with `/`.
//! Validation is centralized in the `keys` module so all backends agree.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_asset_storage, create_video_storage};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
