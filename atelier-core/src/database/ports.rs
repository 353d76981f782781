//! Repository ports for the persistence layer.

use async_trait::async_trait;
use atelier_model::{Image, ImageDetails, Like, LikeToggle};
use uuid::Uuid;

use crate::error::Result;

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn insert(&self, image: &Image) -> Result<()>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Image>>;

    async fn fetch_with_likes(&self, id: Uuid) -> Result<Option<ImageDetails>>;

    /// All images with their likes attached, in insertion order.
    async fn list_with_likes(&self) -> Result<Vec<ImageDetails>>;

    /// Persist the mutable fields of `image` (title, description,
    /// image_path) and return the fresh row. `None` means the row vanished
    /// between load and save.
    async fn update(&self, image: &Image) -> Result<Option<Image>>;

    /// Remove the image row, cascading its likes. Reports whether a row was
    /// actually removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn exists(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Flip the like state for (`image_id`, `user_id`) and adjust the
    /// image's like counter in the same atomic unit. The counter and the
    /// like-row set never diverge, even under interleaved calls.
    async fn toggle(&self, image_id: Uuid, user_id: Uuid) -> Result<LikeToggle>;

    async fn is_liked(&self, image_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn list_for_image(&self, image_id: Uuid) -> Result<Vec<Like>>;
}
