//! Response payloads for the like endpoints and the upload policy view.

use serde::{Deserialize, Serialize};

/// Result of a like toggle: the fresh counter and the new liked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub like_count: i64,
    pub is_liked: bool,
}

/// Whether the calling user has liked an image. Anonymous callers always
/// read `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
}

/// Upload constraints surfaced to clients before they pick a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
}
