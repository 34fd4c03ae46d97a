use super::changelist;
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::RestaurantCategoryModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::restaurant_category::RestaurantCategoryService;
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
pub struct RestaurantCategoryRequest {
    /// Name (1-20 characters)
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    pub cuisine_type_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantCategoryResponse {
    pub id: i32,
    pub name: String,
    pub cuisine_type_id: Option<i32>,
}

impl From<RestaurantCategoryModel> for RestaurantCategoryResponse {
    fn from(c: RestaurantCategoryModel) -> Self {
        Self {
            id: c.id,
            name: c.name,
            cuisine_type_id: c.cuisine_type_id,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/restaurant-categories",
    params(
        ("q" = Option<String>, Query, description = "Search by name"),
        ("cuisine_type_id" = Option<String>, Query, description = "Cuisine type id or `null`"),
        ("o" = Option<String>, Query, description = "Ordering"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Category changelist", body = PaginatedResponse<serde_json::Value>),
        (status = 400, description = "Invalid filter", body = AppError),
    ),
    tag = "restaurant_categories"
)]
pub async fn list_restaurant_categories(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("restaurant_category")?;
    let params = ListParams::new(raw);
    let page = RestaurantCategoryService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/restaurant-categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = RestaurantCategoryResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurant_categories"
)]
pub async fn get_restaurant_category(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let category = RestaurantCategoryService::new(db).get(id).await?;
    Ok(ApiResponse::ok(RestaurantCategoryResponse::from(category)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/restaurant-categories",
    request_body = RestaurantCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = RestaurantCategoryResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Unknown cuisine type", body = AppError),
    ),
    tag = "restaurant_categories"
)]
pub async fn create_restaurant_category(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<RestaurantCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let category = RestaurantCategoryService::new(db)
        .create(&payload.name, payload.cuisine_type_id)
        .await?;
    Ok(ApiResponse::ok(RestaurantCategoryResponse::from(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/restaurant-categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = RestaurantCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = RestaurantCategoryResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurant_categories"
)]
pub async fn update_restaurant_category(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<RestaurantCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let category = RestaurantCategoryService::new(db)
        .update(id, &payload.name, payload.cuisine_type_id)
        .await?;
    Ok(ApiResponse::ok(RestaurantCategoryResponse::from(category)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/restaurant-categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurant_categories"
)]
pub async fn delete_restaurant_category(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    RestaurantCategoryService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Category deleted successfully"))
}
