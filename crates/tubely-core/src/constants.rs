//! Upload limits and media type allow-lists.

/// Maximum thumbnail payload: 10 MiB.
pub const MAX_THUMBNAIL_SIZE_BYTES: u64 = 10 << 20;

/// Maximum video payload: 1 GiB.
pub const MAX_VIDEO_SIZE_BYTES: u64 = 1 << 30;

/// Multipart field carrying the thumbnail image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart field carrying the video file.
pub const VIDEO_FIELD: &str = "video";

/// Media types accepted for thumbnails.
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// The only media type accepted for videos.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Issuer stamped on and required from access tokens.
pub const ACCESS_TOKEN_ISSUER: &str = "tubely-access";

/// URL path under which the asset root is served.
pub const ASSETS_PATH: &str = "/assets";
