//! Common utilities for the upload handlers

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tubely_core::{models::Video, AppError};
use tubely_db::VideoStore;
use uuid::Uuid;

const ASSET_NAME_BYTES: usize = 32;

/// A file-typed multipart entry, before its body is read.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    /// Declared media type, normalized by [`normalize_mime_type`].
    pub media_type: String,
}

/// Parse the `{videoID}` path segment.
pub fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("Invalid video ID".to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid video ID".to_string()))
}

/// Fetch a video and check that `user_id` owns it.
pub async fn load_owned_video(
    videos: &dyn VideoStore,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user_id) {
        return Err(AppError::Forbidden(
            "User is not the owner of this video".to_string(),
        ));
    }

    Ok(video)
}

pub fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Failed to read multipart: {}", err))
}

/// The body is not a readable `multipart/form-data` request.
///
/// Handlers take the extractor as a `Result` and apply this only after the
/// caller is authenticated, so credential errors win over body errors.
pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::BadRequest(format!("Invalid multipart request: {}", rejection))
}

/// Describe a multipart field as a file, or reject it if it carries no filename.
pub fn file_part(field: &Field<'_>, label: &str) -> Result<FilePart, AppError> {
    let file_name = field
        .file_name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is not a file", label)))?
        .to_string();
    let media_type = normalize_mime_type(field.content_type().unwrap_or("application/octet-stream"));

    Ok(FilePart {
        file_name,
        media_type,
    })
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate a normalized media type against an allowlist.
pub fn validate_content_type(media_type: &str, allowed_types: &[&str]) -> Result<(), AppError> {
    if !allowed_types.contains(&media_type) {
        return Err(AppError::BadRequest(format!(
            "Unsupported format '{}'. Allowed types: {}",
            media_type,
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// File extension for a media type: its subtype (`image/png` -> `png`).
pub fn media_extension(media_type: &str) -> Option<&str> {
    media_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .filter(|subtype| !subtype.is_empty())
}

/// Fresh URL-safe name for a stored asset: 32 random bytes, base64url without padding.
pub fn random_asset_name() -> String {
    let mut bytes = [0u8; ASSET_NAME_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn too_large(label: &str, max_bytes: u64) -> AppError {
    AppError::BadRequest(format!(
        "{} too large: exceeds the {} MiB limit",
        label,
        max_bytes / 1024 / 1024
    ))
}

/// Read a field into memory, failing as soon as it grows past `max_bytes`.
pub async fn read_field_limited(
    field: &mut Field<'_>,
    max_bytes: u64,
    label: &str,
) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (data.len() + chunk.len()) as u64 > max_bytes {
            return Err(too_large(label, max_bytes));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Stream a field into `path` (created or truncated), failing as soon as it grows past `max_bytes`.
///
/// On failure the partially written file is left behind; the caller owns its removal.
pub async fn stream_field_to_file(
    field: &mut Field<'_>,
    path: &Path,
    max_bytes: u64,
    label: &str,
) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        written += chunk.len() as u64;
        if written > max_bytes {
            return Err(too_large(label, max_bytes));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(written)
}
