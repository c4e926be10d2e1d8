use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};
use tubely_core::{models::Video, AppError};
use uuid::Uuid;

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at";

/// Video metadata persistence used by the upload handlers.
///
/// `get_video` returns `Ok(None)` for an unknown id; callers decide whether
/// that is a 404.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<(), AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist every mutable field of `video`, matched by id.
    ///
    /// Fails with `NotFound` if the row no longer exists.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;
}

/// Repository for video records
#[derive(Clone)]
pub struct VideoRepository {
    pool: SqlitePool,
}

impl VideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    async fn create_video(&self, video: &Video) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = ?", VIDEO_COLUMNS);
        let video = sqlx::query_as::<Sqlite, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = ?, description = ?, thumbnail_url = ?, video_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(Utc::now())
        .bind(video.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Couldn't find video".to_string()));
        }

        Ok(())
    }
}
