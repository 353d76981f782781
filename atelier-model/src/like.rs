use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user's endorsement of one image.
///
/// At most one like exists per (`image_id`, `user_id`) pair; the storage
/// layer enforces this with a unique composite index. Likes are created and
/// destroyed by the toggle operation and never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub image_id: Uuid,
    pub user_id: Uuid,
    pub liked_date: DateTime<Utc>,
}
