use super::{changelist, format_time, parse_time};
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::{RestaurantImageModel, RestaurantMenuModel};
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::restaurant::{
    ImageFields, MenuFields, RestaurantDetail, RestaurantFields, RestaurantService,
};
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RestaurantRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub branch_name: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 255))]
    pub feature: String,
    pub category_id: Option<i32>,
    #[serde(default)]
    pub is_closed: bool,
    /// E.164 phone number, stored as given
    #[validate(length(max = 16))]
    pub phone: String,
    /// Defaults to 0
    pub latitude: Option<Decimal>,
    /// Defaults to 0
    pub longitude: Option<Decimal>,
    pub description: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    pub start_time: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    pub end_time: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    pub last_order_time: Option<String>,
    /// Tag ids; omitted keeps the current set on update
    pub tags: Option<Vec<i32>>,
}

impl RestaurantRequest {
    fn into_parts(self) -> AppResult<(RestaurantFields, Option<Vec<i32>>)> {
        let fields = RestaurantFields {
            start_time: parse_time("start_time", self.start_time.as_deref())?,
            end_time: parse_time("end_time", self.end_time.as_deref())?,
            last_order_time: parse_time("last_order_time", self.last_order_time.as_deref())?,
            name: self.name,
            branch_name: self.branch_name,
            address: self.address,
            feature: self.feature,
            category_id: self.category_id,
            is_closed: self.is_closed,
            phone: self.phone,
            latitude: self.latitude.unwrap_or(Decimal::ZERO),
            longitude: self.longitude.unwrap_or(Decimal::ZERO),
            description: self.description,
        };
        Ok((fields, self.tags))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MenuRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price: i32,
    #[validate(length(max = 100))]
    pub image: Option<String>,
}

impl From<MenuRequest> for MenuFields {
    fn from(r: MenuRequest) -> Self {
        Self {
            name: r.name,
            price: r.price,
            image: r.image,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImageRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Stored media path
    #[validate(length(min = 1, max = 100))]
    pub image: String,
    #[serde(default)]
    pub is_representative: bool,
    #[validate(range(min = 0))]
    pub display_order: Option<i32>,
}

impl From<ImageRequest> for ImageFields {
    fn from(r: ImageRequest) -> Self {
        Self {
            name: r.name,
            image: r.image,
            is_representative: r.is_representative,
            display_order: r.display_order,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub price: i32,
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RestaurantMenuModel> for MenuResponse {
    fn from(m: RestaurantMenuModel) -> Self {
        Self {
            id: m.id,
            restaurant_id: m.restaurant_id,
            name: m.name,
            price: m.price,
            image: m.image,
            created_at: m.created_at.to_string(),
            updated_at: m.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub image: String,
    pub is_representative: bool,
    pub display_order: Option<i32>,
    pub created_at: String,
    pub modified_at: String,
}

impl From<RestaurantImageModel> for ImageResponse {
    fn from(i: RestaurantImageModel) -> Self {
        Self {
            id: i.id,
            restaurant_id: i.restaurant_id,
            name: i.name,
            image: i.image,
            is_representative: i.is_representative,
            display_order: i.display_order,
            created_at: i.created_at.to_string(),
            modified_at: i.modified_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub branch_name: Option<String>,
    /// `name` or `name-branch_name`
    pub display_name: String,
    pub address: Option<String>,
    pub feature: String,
    pub category_id: Option<i32>,
    pub is_closed: bool,
    pub phone: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub description: Option<String>,
    pub rating: Decimal,
    pub rating_count: i32,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub last_order_time: Option<String>,
    pub tags: Vec<i32>,
    pub menus: Vec<MenuResponse>,
    pub images: Vec<ImageResponse>,
}

impl From<RestaurantDetail> for RestaurantResponse {
    fn from(d: RestaurantDetail) -> Self {
        let r = d.restaurant;
        Self {
            display_name: r.display_name(),
            id: r.id,
            name: r.name,
            branch_name: r.branch_name,
            address: r.address,
            feature: r.feature,
            category_id: r.category_id,
            is_closed: r.is_closed,
            phone: r.phone,
            latitude: r.latitude,
            longitude: r.longitude,
            description: r.description,
            rating: r.rating,
            rating_count: r.rating_count,
            start_time: format_time(r.start_time),
            end_time: format_time(r.end_time),
            last_order_time: format_time(r.last_order_time),
            tags: d.tag_ids,
            menus: d.menus.into_iter().map(MenuResponse::from).collect(),
            images: d.images.into_iter().map(ImageResponse::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/restaurants",
    params(
        ("q" = Option<String>, Query, description = "Search in name and branch name"),
        ("tags" = Option<i32>, Query, description = "Only restaurants carrying this tag"),
        ("o" = Option<String>, Query, description = "Ordering"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Restaurant changelist", body = PaginatedResponse<serde_json::Value>),
        (status = 400, description = "Invalid filter", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn list_restaurants(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("restaurant")?;
    let params = ListParams::new(raw);
    let page = RestaurantService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant with tags, menus and images", body = RestaurantResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let detail = RestaurantService::new(db).detail(id).await?;
    Ok(ApiResponse::ok(RestaurantResponse::from(detail)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Unknown category or tag", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn create_restaurant(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<RestaurantRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let (fields, tags) = payload.into_parts()?;
    let detail = RestaurantService::new(db).create(fields, tags).await?;
    Ok(ApiResponse::ok(RestaurantResponse::from(detail)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn update_restaurant(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<RestaurantRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let (fields, tags) = payload.into_parts()?;
    let detail = RestaurantService::new(db).update(id, fields, tags).await?;
    Ok(ApiResponse::ok(RestaurantResponse::from(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant and its children deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn delete_restaurant(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    RestaurantService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Restaurant deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/restaurants/{id}/menus",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Menus of the restaurant", body = Vec<MenuResponse>),
    ),
    tag = "restaurants"
)]
pub async fn list_menus(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = RestaurantService::new(db);
    service.get(id).await?;
    let menus = service.list_menus(id).await?;
    let items: Vec<MenuResponse> = menus.into_iter().map(MenuResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/restaurants/{id}/menus",
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Menu added", body = MenuResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Restaurant not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn create_menu(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let menu = RestaurantService::new(db)
        .create_menu(id, payload.into())
        .await?;
    Ok(ApiResponse::ok(MenuResponse::from(menu)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/restaurant-menus/{id}",
    params(("id" = i32, Path, description = "Menu ID")),
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = MenuResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn update_menu(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let menu = RestaurantService::new(db)
        .update_menu(id, payload.into())
        .await?;
    Ok(ApiResponse::ok(MenuResponse::from(menu)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/restaurant-menus/{id}",
    params(("id" = i32, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn delete_menu(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    RestaurantService::new(db).delete_menu(id).await?;
    Ok(ApiResponse::ok("Menu deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/restaurants/{id}/images",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Images in display order", body = Vec<ImageResponse>),
    ),
    tag = "restaurants"
)]
pub async fn list_images(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = RestaurantService::new(db);
    service.get(id).await?;
    let images = service.list_images(id).await?;
    let items: Vec<ImageResponse> = images.into_iter().map(ImageResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/restaurants/{id}/images",
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Image added", body = ImageResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Restaurant not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn create_image(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ImageRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let image = RestaurantService::new(db)
        .create_image(id, payload.into())
        .await?;
    Ok(ApiResponse::ok(ImageResponse::from(image)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/restaurant-images/{id}",
    params(("id" = i32, Path, description = "Image ID")),
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Image updated", body = ImageResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn update_image(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ImageRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let image = RestaurantService::new(db)
        .update_image(id, payload.into())
        .await?;
    Ok(ApiResponse::ok(ImageResponse::from(image)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/restaurant-images/{id}",
    params(("id" = i32, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "restaurants"
)]
pub async fn delete_image(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    RestaurantService::new(db).delete_image(id).await?;
    Ok(ApiResponse::ok("Image deleted successfully"))
}
