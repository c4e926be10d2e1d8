use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::parse_video_id;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::{models::Video, AppError};

#[utoipa::path(
    get,
    path = "/api/videos/{videoID}",
    tag = "videos",
    params(
        ("videoID" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = Video),
        (status = 400, description = "Invalid video ID", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_video"))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(video))
}
