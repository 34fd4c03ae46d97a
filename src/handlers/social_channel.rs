use super::changelist;
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::SocialChannelModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::social_channel::SocialChannelService;
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
pub struct SocialChannelRequest {
    /// Name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SocialChannelResponse {
    pub id: i32,
    pub name: String,
}

impl From<SocialChannelModel> for SocialChannelResponse {
    fn from(m: SocialChannelModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/social-channels",
    params(
        ("q" = Option<String>, Query, description = "Search by name"),
        ("o" = Option<String>, Query, description = "Ordering"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Social channel changelist", body = PaginatedResponse<serde_json::Value>),
    ),
    tag = "social_channels"
)]
pub async fn list_social_channels(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("social_channel")?;
    let params = ListParams::new(raw);
    let page = SocialChannelService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/social-channels/{id}",
    params(("id" = i32, Path, description = "Social channel ID")),
    responses(
        (status = 200, description = "Social channel", body = SocialChannelResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "social_channels"
)]
pub async fn get_social_channel(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let item = SocialChannelService::new(db).get(id).await?;
    Ok(ApiResponse::ok(SocialChannelResponse::from(item)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/social-channels",
    request_body = SocialChannelRequest,
    responses(
        (status = 200, description = "Social channel created", body = SocialChannelResponse),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "social_channels"
)]
pub async fn create_social_channel(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<SocialChannelRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let item = SocialChannelService::new(db).create(&payload.name).await?;
    Ok(ApiResponse::ok(SocialChannelResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/social-channels/{id}",
    params(("id" = i32, Path, description = "Social channel ID")),
    request_body = SocialChannelRequest,
    responses(
        (status = 200, description = "Social channel updated", body = SocialChannelResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "social_channels"
)]
pub async fn update_social_channel(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<SocialChannelRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let item = SocialChannelService::new(db).update(id, &payload.name).await?;
    Ok(ApiResponse::ok(SocialChannelResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/social-channels/{id}",
    params(("id" = i32, Path, description = "Social channel ID")),
    responses(
        (status = 200, description = "Social channel deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "social_channels"
)]
pub async fn delete_social_channel(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    SocialChannelService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Social channel deleted successfully"))
}
