use crate::auth::authenticate;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    file_part, load_owned_video, media_extension, multipart_error, multipart_rejection,
    parse_video_id, random_asset_name, read_field_limited, validate_content_type,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::constants::{THUMBNAIL_CONTENT_TYPES, THUMBNAIL_FIELD};
use tubely_core::{models::Video, AppError};

#[utoipa::path(
    post,
    path = "/api/thumbnail_upload/{videoID}",
    tag = "videos",
    params(
        ("videoID" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field `thumbnail`: a JPEG or PNG image of at most 10 MiB"),
    responses(
        (status = 200, description = "Thumbnail stored; updated video", body = Video),
        (status = 400, description = "Invalid ID, not a file, too large, or unsupported format", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let user_id = authenticate(&headers, state.config.jwt_secret())?;

    tracing::info!(video_id = %video_id, user_id = %user_id, "Uploading thumbnail");

    // Ownership is settled before anything touches the asset root.
    let mut video = load_owned_video(state.videos.as_ref(), video_id, user_id).await?;
    let mut multipart = multipart.map_err(multipart_rejection)?;

    let mut stored = None;
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let part = file_part(&field, "Thumbnail")?;
        let data =
            read_field_limited(&mut field, state.limits.max_thumbnail_bytes, "Thumbnail").await?;
        validate_content_type(&part.media_type, THUMBNAIL_CONTENT_TYPES)?;

        let extension = media_extension(&part.media_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unsupported format '{}'", part.media_type))
        })?;
        let key = format!("{}.{}", random_asset_name(), extension);
        let size = data.len();

        let url = state
            .assets
            .upload_with_key(&key, data, &part.media_type)
            .await?;

        tracing::info!(
            video_id = %video_id,
            key = %key,
            original_filename = %part.file_name,
            size_bytes = size,
            "Thumbnail stored"
        );
        stored = Some(url);
        break;
    }

    let thumbnail_url = stored.ok_or_else(|| {
        AppError::BadRequest(format!("Missing form field '{}'", THUMBNAIL_FIELD))
    })?;

    video.thumbnail_url = Some(thumbnail_url);
    state.videos.update_video(&video).await?;

    let updated = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    Ok(Json(updated))
}
