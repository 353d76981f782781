//! The gallery service: CRUD over images, ownership-based authorization,
//! and the like toggle.
//!
//! Authorization always reads the persisted record, never caller-supplied
//! fields, so request tampering cannot reassign ownership.

use std::{fmt, sync::Arc};

use atelier_model::{AuthUser, Image, ImageDetails, LikeToggle, UploadPolicy};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    blob::BlobStore,
    database::ports::{ImageRepository, LikeRepository},
    error::{GalleryError, Result},
    gallery::upload::{self, FileUpload},
};

const MAX_TITLE_CHARS: usize = 100;

/// Submitted title/description pair for create and edit.
#[derive(Debug, Clone, Default)]
pub struct ImageForm {
    pub title: String,
    pub description: String,
}

pub struct GalleryService {
    images: Arc<dyn ImageRepository>,
    likes: Arc<dyn LikeRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for GalleryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryService").finish_non_exhaustive()
    }
}

impl GalleryService {
    pub fn new(
        images: Arc<dyn ImageRepository>,
        likes: Arc<dyn LikeRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            images,
            likes,
            blobs,
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        upload::policy()
    }

    /// All images with their likes, in insertion order. Open to anonymous
    /// callers.
    pub async fn list_images(&self) -> Result<Vec<ImageDetails>> {
        self.images.list_with_likes().await
    }

    pub async fn create_image(
        &self,
        form: ImageForm,
        file: Option<FileUpload>,
        acting_user: &AuthUser,
    ) -> Result<Image> {
        let (title, description) = validate_form(&form)?;

        let Some(file) = file else {
            return Err(GalleryError::validation(
                "file",
                "Please select an image to upload.",
            ));
        };
        upload::validate_upload(&file.file_name, file.bytes.len())?;

        let image_path = self.blobs.store(&file.bytes, &file.file_name).await?;

        let image = Image {
            id: Uuid::new_v4(),
            title,
            description,
            image_path,
            created_date: Utc::now(),
            creator_id: acting_user.id,
            like_count: 0,
        };

        if let Err(err) = self.images.insert(&image).await {
            // The blob was already written; don't leave it orphaned.
            if let Err(cleanup) = self.blobs.delete(&image.image_path).await {
                warn!(path = %image.image_path, "failed to remove blob after insert error: {cleanup}");
            }
            return Err(err);
        }

        info!(image_id = %image.id, creator_id = %acting_user.id, "image created");
        Ok(image)
    }

    /// Fetch an image for editing; only its creator or an admin may see the
    /// edit view.
    pub async fn get_editable(&self, id: Uuid, acting_user: &AuthUser) -> Result<Image> {
        let image = self.fetch_or_not_found(id).await?;
        ensure_owner_or_admin(&image, acting_user)?;
        Ok(image)
    }

    pub async fn update_image(
        &self,
        id: Uuid,
        form: ImageForm,
        file: Option<FileUpload>,
        acting_user: &AuthUser,
    ) -> Result<Image> {
        let current = self.fetch_or_not_found(id).await?;
        ensure_owner_or_admin(&current, acting_user)?;

        let (title, description) = validate_form(&form)?;

        let mut image_path = current.image_path.clone();
        if let Some(file) = file {
            upload::validate_upload(&file.file_name, file.bytes.len())?;

            // Best-effort: an orphaned file is preferable to a failed edit.
            if let Err(err) = self.blobs.delete(&current.image_path).await {
                warn!(path = %current.image_path, "failed to remove replaced blob: {err}");
            }
            image_path = self.blobs.store(&file.bytes, &file.file_name).await?;
        }

        let next = Image {
            id: current.id,
            title,
            description,
            image_path,
            created_date: current.created_date,
            creator_id: current.creator_id,
            like_count: current.like_count,
        };

        let updated = self
            .images
            .update(&next)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("image {id} was removed during update")))?;

        info!(image_id = %id, editor_id = %acting_user.id, "image updated");
        Ok(updated)
    }

    /// Admin-only. Removes the blob (best-effort) and the row; like rows
    /// cascade away with it.
    pub async fn delete_image(&self, id: Uuid, acting_user: &AuthUser) -> Result<()> {
        ensure_admin(acting_user)?;

        let image = self.fetch_or_not_found(id).await?;
        if let Err(err) = self.blobs.delete(&image.image_path).await {
            warn!(path = %image.image_path, "failed to remove blob of deleted image: {err}");
        }

        if !self.images.delete(id).await? {
            // Lost a race with another delete.
            return Err(GalleryError::not_found(format!("image {id} not found")));
        }

        info!(image_id = %id, admin_id = %acting_user.id, "image deleted");
        Ok(())
    }

    /// Admin-only detail view with like relations attached.
    pub async fn get_details(&self, id: Uuid, acting_user: &AuthUser) -> Result<ImageDetails> {
        ensure_admin(acting_user)?;
        self.images
            .fetch_with_likes(id)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("image {id} not found")))
    }

    pub async fn toggle_like(&self, image_id: Uuid, acting_user: &AuthUser) -> Result<LikeToggle> {
        if !self.images.exists(image_id).await? {
            return Err(GalleryError::not_found(format!("image {image_id} not found")));
        }

        let toggled = self.likes.toggle(image_id, acting_user.id).await?;
        info!(
            image_id = %image_id,
            user_id = %acting_user.id,
            liked = toggled.is_liked,
            "like toggled"
        );
        Ok(toggled)
    }

    /// Whether `acting_user` has liked the image; anonymous callers read
    /// `false` without a query.
    pub async fn is_liked(&self, image_id: Uuid, acting_user: Option<&AuthUser>) -> Result<bool> {
        match acting_user {
            None => Ok(false),
            Some(user) => self.likes.is_liked(image_id, user.id).await,
        }
    }

    async fn fetch_or_not_found(&self, id: Uuid) -> Result<Image> {
        self.images
            .fetch(id)
            .await?
            .ok_or_else(|| GalleryError::not_found(format!("image {id} not found")))
    }
}

fn validate_form(form: &ImageForm) -> Result<(String, String)> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(GalleryError::validation("title", "Title is required."));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(GalleryError::validation(
            "title",
            "Title cannot exceed 100 characters.",
        ));
    }

    let description = form.description.trim();
    if description.is_empty() {
        return Err(GalleryError::validation(
            "description",
            "Description is required.",
        ));
    }

    Ok((title.to_string(), description.to_string()))
}

fn ensure_owner_or_admin(image: &Image, user: &AuthUser) -> Result<()> {
    if user.is_admin() || image.creator_id == user.id {
        Ok(())
    } else {
        Err(GalleryError::forbidden(
            "you can only edit images you created",
        ))
    }
}

fn ensure_admin(user: &AuthUser) -> Result<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(GalleryError::forbidden("administrator access required"))
    }
}
