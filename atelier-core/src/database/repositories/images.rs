use std::collections::HashMap;

use async_trait::async_trait;
use atelier_model::{Image, ImageDetails, Like};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{database::ports::ImageRepository, error::Result};

const IMAGE_COLUMNS: &str =
    "id, title, description, image_path, created_date, creator_id, like_count";

#[derive(Clone, Debug)]
pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn likes_for(&self, image_id: Uuid) -> Result<Vec<Like>> {
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

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn insert(&self, image: &Image) -> Result<()> {
        sqlx::query(
            "INSERT INTO images (id, title, description, image_path, created_date, creator_id, like_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(image.id)
        .bind(&image.title)
        .bind(&image.description)
        .bind(&image.image_path)
        .bind(image.created_date)
        .bind(image.creator_id)
        .bind(image.like_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(image)
    }

    async fn fetch_with_likes(&self, id: Uuid) -> Result<Option<ImageDetails>> {
        let Some(image) = self.fetch(id).await? else {
            return Ok(None);
        };
        let likes = self.likes_for(id).await?;
        Ok(Some(ImageDetails { image, likes }))
    }

    async fn list_with_likes(&self) -> Result<Vec<ImageDetails>> {
        let images = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images ORDER BY created_date, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let likes = sqlx::query_as::<_, Like>(
            "SELECT id, image_id, user_id, liked_date FROM likes ORDER BY liked_date, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_image: HashMap<Uuid, Vec<Like>> = HashMap::with_capacity(images.len());
        for like in likes {
            by_image.entry(like.image_id).or_default().push(like);
        }

        Ok(images
            .into_iter()
            .map(|image| {
                let likes = by_image.remove(&image.id).unwrap_or_default();
                ImageDetails { image, likes }
            })
            .collect())
    }

    async fn update(&self, image: &Image) -> Result<Option<Image>> {
        // Only the mutable fields; creator_id, created_date, and like_count
        // stay untouched so concurrent toggles are never clobbered.
        let updated = sqlx::query_as::<_, Image>(&format!(
            "UPDATE images SET title = $2, description = $3, image_path = $4 \
             WHERE id = $1 RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(image.id)
        .bind(&image.title)
        .bind(&image.description)
        .bind(&image.image_path)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM images WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
