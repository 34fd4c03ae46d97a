use super::changelist;
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::TagModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::tag::TagService;
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TagRequest {
    /// Name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
}

impl From<TagModel> for TagResponse {
    fn from(m: TagModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/tags",
    params(
        ("q" = Option<String>, Query, description = "Search by name"),
        ("o" = Option<String>, Query, description = "Ordering"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Tag changelist", body = PaginatedResponse<serde_json::Value>),
    ),
    tag = "tags"
)]
pub async fn list_tags(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("tag")?;
    let params = ListParams::new(raw);
    let page = TagService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/tags/{id}",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "tags"
)]
pub async fn get_tag(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let item = TagService::new(db).get(id).await?;
    Ok(ApiResponse::ok(TagResponse::from(item)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/tags",
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag created", body = TagResponse),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "tags"
)]
pub async fn create_tag(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let item = TagService::new(db).create(&payload.name).await?;
    Ok(ApiResponse::ok(TagResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/tags/{id}",
    params(("id" = i32, Path, description = "Tag ID")),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag updated", body = TagResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "tags"
)]
pub async fn update_tag(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let item = TagService::new(db).update(id, &payload.name).await?;
    Ok(ApiResponse::ok(TagResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/tags/{id}",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "tags"
)]
pub async fn delete_tag(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    TagService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Tag deleted successfully"))
}
