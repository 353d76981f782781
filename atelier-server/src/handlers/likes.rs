use atelier_model::{AuthUser, LikeStatus, LikeToggle};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{AppState, errors::AppResult};

/// POST /api/v1/images/{id}/like - flip the caller's like and return the
/// fresh counter.
pub async fn toggle_like_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<LikeToggle>> {
    Ok(Json(state.gallery.toggle_like(id, &user).await?))
}

/// GET /api/v1/images/{id}/liked - whether the caller has liked the image;
/// anonymous callers always read false.
pub async fn image_liked_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: Option<Extension<AuthUser>>,
) -> AppResult<Json<LikeStatus>> {
    let user = user.map(|Extension(user)| user);
    let is_liked = state.gallery.is_liked(id, user.as_ref()).await?;
    Ok(Json(LikeStatus { is_liked }))
}
