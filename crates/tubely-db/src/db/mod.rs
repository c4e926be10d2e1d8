//! Database repositories for the data access layer
//
// Video metadata repository
pub mod video;

pub use video::{VideoRepository, VideoStore};
