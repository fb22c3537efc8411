use crate::domain::conversion::{Conversion, ConversionStatus, ConversionUpdate};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Persistent store of conversion job records.
///
/// The pipeline only writes through this trait; it never reads records back
/// to make control decisions during a run.
#[async_trait]
pub trait ConversionRepository: Send + Sync {
    /// Insert a PENDING record
    async fn create(&self, title: &str, text_length: i32, voice: &str) -> AppResult<Conversion>;

    async fn update(&self, update: &ConversionUpdate) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Conversion>>;

    /// Most recent records first
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<Conversion>>;
}

/// PostgreSQL implementation of the conversion repository
pub struct PgConversionRepository {
    pool: Arc<DbPool>,
}

impl PgConversionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversionRepository for PgConversionRepository {
    async fn create(&self, title: &str, text_length: i32, voice: &str) -> AppResult<Conversion> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let conversion = sqlx::query_as::<_, Conversion>(
            r#"
            INSERT INTO conversions (id, title, text_length, voice, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, title, text_length, voice, status, audio_filename,
                      video_filename, error_message, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(text_length)
        .bind(voice)
        .bind(ConversionStatus::Pending.as_str())
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(conversion)
    }

    async fn update(&self, update: &ConversionUpdate) -> AppResult<()> {
        let pool = self.pool.as_ref();

        // single-row statement: concurrent writers for one id are serialized by the row lock
        sqlx::query(
            r#"
            UPDATE conversions
            SET status = $1,
                audio_filename = $2,
                video_filename = $3,
                error_message = $4,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(update.status.as_str())
        .bind(&update.audio_filename)
        .bind(&update.video_filename)
        .bind(&update.error_message)
        .bind(chrono::Utc::now())
        .bind(update.id)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Conversion>> {
        let pool = self.pool.as_ref();
        let conversion = sqlx::query_as::<_, Conversion>(
            r#"
            SELECT id, title, text_length, voice, status, audio_filename,
                   video_filename, error_message, created_at, updated_at
            FROM conversions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(conversion)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<Conversion>> {
        let pool = self.pool.as_ref();
        let conversions = sqlx::query_as::<_, Conversion>(
            r#"
            SELECT id, title, text_length, voice, status, audio_filename,
                   video_filename, error_message, created_at, updated_at
            FROM conversions
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(conversions)
    }
}
