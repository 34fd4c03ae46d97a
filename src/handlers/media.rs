use crate::config::media::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services::media::{MediaCategory, MediaService};
use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaResponse {
    /// Relative path to store on the record, e.g. `article/<uuid>.png`
    pub path: String,
    /// Where the stored file is served
    pub url: String,
}

/// POST /admin/media/{category} (multipart form: field "file")
#[utoipa::path(
    post,
    path = "/api/v1/admin/media/{category}",
    params((
        "category" = String,
        Path,
        description = "article, restaurant_image, restaurant_menu, review_images or review_profile"
    )),
    request_body(content_type = "multipart/form-data", description = "Image in field `file`"),
    responses(
        (status = 200, description = "File stored", body = MediaResponse),
        (status = 400, description = "Unsupported file", body = AppError),
        (status = 404, description = "Unknown category", body = AppError),
        (status = 413, description = "File too large", body = AppError),
    ),
    tag = "media"
)]
pub async fn upload_media(
    Extension(config): Extension<MediaConfig>,
    Path(category): Path<String>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let category: MediaCategory = category.parse()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::Validation(format!("Failed to read file data: {}", e))
            }
        })?;

        let path = MediaService::store(&config, category, &data, &content_type).await?;
        let url = config.url_for(&path);
        return Ok(ApiResponse::ok(MediaResponse { path, url }));
    }

    Err(AppError::Validation("No file provided".to_string()))
}
