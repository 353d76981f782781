use async_trait::async_trait;
use atelier_model::{Like, LikeToggle};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    database::ports::LikeRepository,
    error::{GalleryError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresLikeRepository {
    pool: PgPool,
}

impl PostgresLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn toggle(&self, image_id: Uuid, user_id: Uuid) -> Result<LikeToggle> {
        let mut tx = self.pool.begin().await?;

        // Locking the image row serializes toggles per image; the unique
        // index over (image_id, user_id) remains the storage-level guard.
        let locked: Option<i64> =
            sqlx::query_scalar("SELECT like_count FROM images WHERE id = $1 FOR UPDATE")
                .bind(image_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Err(GalleryError::not_found(format!("image {image_id} not found")));
        }

        let removed = sqlx::query("DELETE FROM likes WHERE image_id = $1 AND user_id = $2")
            .bind(image_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (like_count, is_liked) = if removed > 0 {
            let count: i64 = sqlx::query_scalar(
                "UPDATE images SET like_count = like_count - 1 WHERE id = $1 RETURNING like_count",
            )
            .bind(image_id)
            .fetch_one(&mut *tx)
            .await?;
            (count, false)
        } else {
            sqlx::query(
                "INSERT INTO likes (id, image_id, user_id, liked_date) VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(image_id)
            .bind(user_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            let count: i64 = sqlx::query_scalar(
                "UPDATE images SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count",
            )
            .bind(image_id)
            .fetch_one(&mut *tx)
            .await?;
            (count, true)
        };

        tx.commit().await?;

        Ok(LikeToggle {
            like_count,
            is_liked,
        })
    }

    async fn is_liked(&self, image_id: Uuid, user_id: Uuid) -> Result<bool> {
        let liked: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE image_id = $1 AND user_id = $2)",
        )
        .bind(image_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(liked)
    }

    async fn list_for_image(&self, image_id: Uuid) -> Result<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            "SELECT id, image_id, user_id, liked_date FROM likes \
             WHERE image_id = $1 ORDER BY liked_date, id",
        )
        .bind(image_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(likes)
    }
}
