use atelier_core::gallery::{FileUpload, ImageForm};
use atelier_model::{AuthUser, Image, ImageDetails, UploadPolicy};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{AppState, errors::{AppError, AppResult}};

/// GET /api/v1/images - public index with like relations attached.
pub async fn list_images_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ImageDetails>>> {
    Ok(Json(state.gallery.list_images().await?))
}

/// GET /api/v1/images/new - upload constraints for the create form.
pub async fn new_image_handler(State(state): State<AppState>) -> Json<UploadPolicy> {
    Json(state.gallery.upload_policy())
}

/// POST /api/v1/images - multipart create (title, description, file).
pub async fn create_image_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (form, file) = read_image_form(&mut multipart).await?;
    let image = state.gallery.create_image(form, file, &user).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// GET /api/v1/images/{id}/edit - the image as the creator (or an admin)
/// may edit it.
pub async fn edit_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Image>> {
    Ok(Json(state.gallery.get_editable(id, &user).await?))
}

/// POST /api/v1/images/{id} - multipart update; the file part is optional.
pub async fn update_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> AppResult<Json<Image>> {
    let (form, file) = read_image_form(&mut multipart).await?;
    Ok(Json(state.gallery.update_image(id, form, file, &user).await?))
}

/// GET /api/v1/images/{id} - admin detail view with likes.
pub async fn image_details_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<ImageDetails>> {
    Ok(Json(state.gallery.get_details(id, &user).await?))
}

/// GET /api/v1/images/{id}/delete - the image an admin is about to delete.
pub async fn delete_confirm_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Image>> {
    let details = state.gallery.get_details(id, &user).await?;
    Ok(Json(details.image))
}

/// POST /api/v1/images/{id}/delete - admin delete; likes cascade away.
pub async fn delete_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<StatusCode> {
    state.gallery.delete_image(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pull `title`, `description`, and the optional `file` part out of a
/// multipart body. A file part with an empty filename (an untouched HTML
/// file input) counts as no upload.
async fn read_image_form(
    multipart: &mut Multipart,
) -> Result<(ImageForm, Option<FileUpload>), AppError> {
    let mut form = ImageForm::default();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = read_text(field).await?,
            "description" => form.description = read_text(field).await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|err| {
                    AppError::bad_request(format!("failed to read upload: {err}"))
                })?;
                if !file_name.is_empty() {
                    file = Some(FileUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok((form, file))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::bad_request(format!("malformed multipart field: {err}")))
}
