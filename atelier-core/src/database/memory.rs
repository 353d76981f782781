//! In-memory implementation of the repository ports.
//!
//! Backs the server's handler tests and database-less development runs.
//! Semantics mirror the Postgres repositories: insertion-order listing,
//! cascade on delete, and atomic like toggles under a single store lock.

use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use atelier_model::{Image, ImageDetails, Like, LikeToggle};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    database::ports::{ImageRepository, LikeRepository},
    error::{GalleryError, Result},
};

#[derive(Default)]
struct StoreInner {
    order: Vec<Uuid>,
    images: HashMap<Uuid, Image>,
    likes: Vec<Like>,
}

#[derive(Default)]
pub struct InMemoryGalleryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryGalleryStore {
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("gallery store lock poisoned")
    }

    fn likes_for(inner: &StoreInner, image_id: Uuid) -> Vec<Like> {
        inner
            .likes
            .iter()
            .filter(|like| like.image_id == image_id)
            .cloned()
            .collect()
    }
}

impl fmt::Debug for InMemoryGalleryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("InMemoryGalleryStore")
            .field("images", &inner.images.len())
            .field("likes", &inner.likes.len())
            .finish()
    }
}

#[async_trait]
impl ImageRepository for InMemoryGalleryStore {
    async fn insert(&self, image: &Image) -> Result<()> {
        let mut inner = self.lock();
        if inner.images.contains_key(&image.id) {
            return Err(GalleryError::internal(format!(
                "duplicate image id {}",
                image.id
            )));
        }
        inner.order.push(image.id);
        inner.images.insert(image.id, image.clone());
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Image>> {
        Ok(self.lock().images.get(&id).cloned())
    }

    async fn fetch_with_likes(&self, id: Uuid) -> Result<Option<ImageDetails>> {
        let inner = self.lock();
        Ok(inner.images.get(&id).cloned().map(|image| {
            let likes = Self::likes_for(&inner, id);
            ImageDetails { image, likes }
        }))
    }

    async fn list_with_likes(&self) -> Result<Vec<ImageDetails>> {
        let inner = self.lock();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.images.get(id).cloned())
            .map(|image| {
                let likes = Self::likes_for(&inner, image.id);
                ImageDetails { image, likes }
            })
            .collect())
    }

    async fn update(&self, image: &Image) -> Result<Option<Image>> {
        let mut inner = self.lock();
        let Some(existing) = inner.images.get_mut(&image.id) else {
            return Ok(None);
        };
        existing.title = image.title.clone();
        existing.description = image.description.clone();
        existing.image_path = image.image_path.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.lock();
        if inner.images.remove(&id).is_none() {
            return Ok(false);
        }
        inner.order.retain(|other| *other != id);
        inner.likes.retain(|like| like.image_id != id);
        Ok(true)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock().images.contains_key(&id))
    }
}

#[async_trait]
impl LikeRepository for InMemoryGalleryStore {
    async fn toggle(&self, image_id: Uuid, user_id: Uuid) -> Result<LikeToggle> {
        let mut inner = self.lock();
        if !inner.images.contains_key(&image_id) {
            return Err(GalleryError::not_found(format!("image {image_id} not found")));
        }

        let existing = inner
            .likes
            .iter()
            .position(|like| like.image_id == image_id && like.user_id == user_id);

        let is_liked = match existing {
            Some(index) => {
                inner.likes.remove(index);
                false
            }
            None => {
                inner.likes.push(Like {
                    id: Uuid::new_v4(),
                    image_id,
                    user_id,
                    liked_date: Utc::now(),
                });
                true
            }
        };

        let like_count = inner
            .likes
            .iter()
            .filter(|like| like.image_id == image_id)
            .count() as i64;

        let image = inner
            .images
            .get_mut(&image_id)
            .expect("image checked above");
        image.like_count = like_count;

        Ok(LikeToggle {
            like_count,
            is_liked,
        })
    }

    async fn is_liked(&self, image_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .lock()
            .likes
            .iter()
            .any(|like| like.image_id == image_id && like.user_id == user_id))
    }

    async fn list_for_image(&self, image_id: Uuid) -> Result<Vec<Like>> {
        Ok(Self::likes_for(&self.lock(), image_id))
    }
}
