//! PostgreSQL gallery repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::GalleryRow;
use crate::repo::{CreateGalleryItem, GalleryRepository};

/// PostgreSQL gallery repository
#[derive(Clone)]
pub struct PgGalleryRepository {
    pool: PgPool,
}

impl PgGalleryRepository {
    /// Create a new gallery repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryRepository for PgGalleryRepository {
    async fn insert(&self, item: CreateGalleryItem) -> DbResult<GalleryRow> {
        let row = sqlx::query_as::<_, GalleryRow>(
            r#"
            INSERT INTO gallery (id, user_key, url, occasion, prompt)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_key, url, occasion, prompt, created_at
            "#,
        )
        .bind(item.id)
        .bind(&item.user_key)
        .bind(&item.url)
        .bind(&item.occasion)
        .bind(&item.prompt)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_for_user(&self, user_key: &str) -> DbResult<Vec<GalleryRow>> {
        let rows = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, user_key, url, occasion, prompt, created_at
            FROM gallery
            WHERE user_key = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_key)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete(&self, user_key: &str, id: Uuid) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM gallery
            WHERE user_key = $1 AND id = $2
            "#,
        )
        .bind(user_key)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
