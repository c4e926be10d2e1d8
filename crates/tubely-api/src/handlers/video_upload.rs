use crate::auth::authenticate;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    file_part, load_owned_video, multipart_error, multipart_rejection, parse_video_id,
    stream_field_to_file, validate_content_type,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::path::Path as FsPath;
use std::sync::Arc;
use tubely_core::constants::{VIDEO_CONTENT_TYPE, VIDEO_FIELD};
use tubely_core::{models::Video, AppError};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/video_upload/{videoID}",
    tag = "videos",
    params(
        ("videoID" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field `video`: an MP4 file of at most 1 GiB"),
    responses(
        (status = 200, description = "Video stored; updated video", body = Video),
        (status = 400, description = "Invalid ID, not a file, too large, or unsupported format", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let user_id = authenticate(&headers, state.config.jwt_secret())?;

    tracing::info!(video_id = %video_id, user_id = %user_id, "Uploading video");

    let video = load_owned_video(state.videos.as_ref(), video_id, user_id).await?;
    let mut multipart = multipart.map_err(multipart_rejection)?;

    // Concurrent uploads for the same video share this path; last writer wins.
    let staged_path = state.config.staging_dir().join(video_key(video_id));

    let result = store_video(&state, &mut multipart, video, &staged_path).await;
    remove_staged_file(&staged_path).await;
    let updated = result?;

    Ok(Json(updated))
}

/// Stage the `video` field on disk, push it to video storage and record its URL.
async fn store_video(
    state: &AppState,
    multipart: &mut Multipart,
    mut video: Video,
    staged_path: &FsPath,
) -> Result<Video, HttpAppError> {
    let video_id = video.id;
    let mut staged = false;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let part = file_part(&field, "Video")?;
        validate_content_type(&part.media_type, &[VIDEO_CONTENT_TYPE])?;

        let size = stream_field_to_file(
            &mut field,
            staged_path,
            state.limits.max_video_bytes,
            "Video",
        )
        .await?;

        tracing::debug!(
            video_id = %video_id,
            path = %staged_path.display(),
            original_filename = %part.file_name,
            size_bytes = size,
            "Video staged"
        );
        staged = true;
        break;
    }

    if !staged {
        return Err(AppError::BadRequest(format!("Missing form field '{}'", VIDEO_FIELD)).into());
    }

    let key = video_key(video_id);
    let video_url = state
        .video_storage
        .upload_file(&key, staged_path, VIDEO_CONTENT_TYPE)
        .await?;

    tracing::info!(video_id = %video_id, key = %key, url = %video_url, "Video stored");

    video.video_url = Some(video_url);
    state.videos.update_video(&video).await?;

    let updated = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    Ok(updated)
}

fn video_key(video_id: Uuid) -> String {
    format!("{}.mp4", video_id)
}

/// Best-effort removal of the staged upload; failures are only logged.
async fn remove_staged_file(path: &FsPath) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove staged video");
        }
    }
}
