//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tubely_core::models;

/// Returns the generated OpenAPI document.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video hosting backend: thumbnail and MP4 uploads for existing video records. Upload endpoints require a bearer access token belonging to the video owner."
    ),
    paths(
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::video_upload::upload_video,
        handlers::video_get::get_video,
    ),
    components(
        schemas(
            models::Video,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video records and their media uploads")
    )
)]
pub struct ApiDoc;
