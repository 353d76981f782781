use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::like::Like;

/// A gallery entry wrapping metadata and a reference to stored image bytes.
///
/// `creator_id` and `created_date` are set once at creation and never change;
/// `like_count` is a denormalized count of active [`Like`] rows and must stay
/// equal to the number of likes persisted for this image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Public path of the stored blob, e.g. `/uploads/sunset251011093045123.png`.
    pub image_path: String,
    pub created_date: DateTime<Utc>,
    pub creator_id: Uuid,
    pub like_count: i64,
}

/// An image together with its like relations, as returned by the index and
/// admin detail views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    #[serde(flatten)]
    pub image: Image,
    pub likes: Vec<Like>,
}
