use super::changelist;
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::CuisineTypeModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::cuisine_type::CuisineTypeService;
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
pub struct CuisineTypeRequest {
    /// Name (1-20 characters)
    #[validate(length(min = 1, max = 20))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CuisineTypeResponse {
    pub id: i32,
    pub name: String,
}

impl From<CuisineTypeModel> for CuisineTypeResponse {
    fn from(m: CuisineTypeModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/cuisine-types",
    params(
        ("q" = Option<String>, Query, description = "Search by name"),
        ("o" = Option<String>, Query, description = "Ordering"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Cuisine type changelist", body = PaginatedResponse<serde_json::Value>),
    ),
    tag = "cuisine_types"
)]
pub async fn list_cuisine_types(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("cuisine_type")?;
    let params = ListParams::new(raw);
    let page = CuisineTypeService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/cuisine-types/{id}",
    params(("id" = i32, Path, description = "Cuisine type ID")),
    responses(
        (status = 200, description = "Cuisine type", body = CuisineTypeResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "cuisine_types"
)]
pub async fn get_cuisine_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let item = CuisineTypeService::new(db).get(id).await?;
    Ok(ApiResponse::ok(CuisineTypeResponse::from(item)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/cuisine-types",
    request_body = CuisineTypeRequest,
    responses(
        (status = 200, description = "Cuisine type created", body = CuisineTypeResponse),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "cuisine_types"
)]
pub async fn create_cuisine_type(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CuisineTypeRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let item = CuisineTypeService::new(db).create(&payload.name).await?;
    Ok(ApiResponse::ok(CuisineTypeResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/cuisine-types/{id}",
    params(("id" = i32, Path, description = "Cuisine type ID")),
    request_body = CuisineTypeRequest,
    responses(
        (status = 200, description = "Cuisine type updated", body = CuisineTypeResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "cuisine_types"
)]
pub async fn update_cuisine_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<CuisineTypeRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let item = CuisineTypeService::new(db).update(id, &payload.name).await?;
    Ok(ApiResponse::ok(CuisineTypeResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/cuisine-types/{id}",
    params(("id" = i32, Path, description = "Cuisine type ID")),
    responses(
        (status = 200, description = "Cuisine type deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "cuisine_types"
)]
pub async fn delete_cuisine_type(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    CuisineTypeService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Cuisine type deleted successfully"))
}
