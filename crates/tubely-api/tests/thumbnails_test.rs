//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnails_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{file_form, png_bytes};
use helpers::{bearer, setup_test_app};
use tubely_core::models::Video;
use uuid::Uuid;

const MIB: usize = 1024 * 1024;

#[tokio::test]
async fn test_upload_png_thumbnail() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let data = png_bytes(5 * MIB);
    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form("thumbnail", "thumb.png", "image/png", data.clone()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Video = response.json();
    assert_eq!(body.id, video.id);
    assert_eq!(body.title, "Boots");

    let url = body.thumbnail_url.expect("thumbnail_url should be set");
    assert!(url.starts_with("http://localhost:8091/assets/"), "url: {}", url);
    assert!(url.ends_with(".png"), "url: {}", url);

    let name = url.rsplit('/').next().unwrap();
    let stem = name.trim_end_matches(".png");
    assert_eq!(stem.len(), 43);
    assert!(stem
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

    let stored = std::fs::read(app.assets_dir.path().join(name)).unwrap();
    assert_eq!(stored, data);

    let persisted = app.fetch_video(video.id).await;
    assert_eq!(persisted.thumbnail_url.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn test_uploaded_thumbnail_is_served_from_assets() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let data = png_bytes(4096);
    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form("thumbnail", "thumb.png", "image/png", data.clone()))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Video = response.json();
    let url = body.thumbnail_url.unwrap();
    let name = url.rsplit('/').next().unwrap();

    let served = app.client().get(&format!("/assets/{}", name)).await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().to_vec(), data);
}

#[tokio::test]
async fn test_each_thumbnail_upload_gets_a_fresh_name() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let mut urls = Vec::new();
    for _ in 0..2 {
        let response = app
            .client()
            .post(&format!("/api/thumbnail_upload/{}", video.id))
            .add_header("Authorization", bearer(owner))
            .multipart(file_form("thumbnail", "thumb.jpg", "image/jpeg", png_bytes(512)))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Video = response.json();
        urls.push(body.thumbnail_url.unwrap());
    }

    assert_ne!(urls[0], urls[1]);
    assert!(urls.iter().all(|u| u.ends_with(".jpeg")));
    assert_eq!(app.asset_files().len(), 2);
}

#[tokio::test]
async fn test_gif_thumbnail_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form("thumbnail", "anim.gif", "image/gif", vec![0x47; 128]))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported format"));
    assert!(app.asset_files().is_empty());
    assert!(app.fetch_video(video.id).await.thumbnail_url.is_none());
}

#[tokio::test]
async fn test_oversized_thumbnail_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form(
            "thumbnail",
            "huge.png",
            "image/png",
            png_bytes(10 * MIB + 1),
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("too large"));
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_thumbnail_at_exact_limit_accepted() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form(
            "thumbnail",
            "edge.png",
            "image/png",
            png_bytes(10 * MIB),
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(app.asset_files().len(), 1);
}

#[tokio::test]
async fn test_thumbnail_for_someone_elses_video_forbidden() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(Uuid::new_v4()))
        .multipart(file_form("thumbnail", "thumb.png", "image/png", png_bytes(256)))
        .await;

    assert_eq!(response.status_code(), 403);
    assert!(app.asset_files().is_empty());
    assert!(app.fetch_video(video.id).await.thumbnail_url.is_none());
}

#[tokio::test]
async fn test_thumbnail_without_token_unauthorized() {
    let app = setup_test_app().await;
    let video = app.seed_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .multipart(file_form("thumbnail", "thumb.png", "image/png", png_bytes(256)))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_thumbnail_with_garbage_token_unauthorized() {
    let app = setup_test_app().await;
    let video = app.seed_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", "Bearer not-a-jwt")
        .multipart(file_form("thumbnail", "thumb.png", "image/png", png_bytes(256)))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_thumbnail_invalid_video_id() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post("/api/thumbnail_upload/not-a-uuid")
        .add_header("Authorization", bearer(owner))
        .multipart(file_form("thumbnail", "thumb.png", "image/png", png_bytes(256)))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid video ID");
}

#[tokio::test]
async fn test_thumbnail_unknown_video_not_found() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", Uuid::new_v4()))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form("thumbnail", "thumb.png", "image/png", png_bytes(256)))
        .await;

    assert_eq!(response.status_code(), 404);
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_thumbnail_field_that_is_not_a_file() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let form = MultipartForm::new().add_text("thumbnail", "just some text");
    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_thumbnail_missing_field() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .multipart(file_form("image", "thumb.png", "image/png", png_bytes(256)))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("thumbnail"));
}

#[tokio::test]
async fn test_thumbnail_non_multipart_body_without_token_unauthorized() {
    let app = setup_test_app().await;
    let video = app.seed_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .text("hello")
        .await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_thumbnail_non_multipart_body_from_owner_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(owner))
        .text("hello")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid multipart request"));
    assert!(app.asset_files().is_empty());
}
