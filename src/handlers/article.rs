use super::changelist;
use crate::admin::site::MAKE_PUBLISHED;
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::ArticleModel;
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::article::{ArticleFields, ArticleService};
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
pub struct ArticleRequest {
    /// Title (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    /// Stored media path of the preview image
    #[validate(length(max = 100))]
    pub preview_image: Option<String>,
    pub content: String,
    #[serde(default)]
    pub show_at_index: bool,
    #[serde(default)]
    pub is_published: bool,
}

impl From<ArticleRequest> for ArticleFields {
    fn from(r: ArticleRequest) -> Self {
        Self {
            title: r.title,
            preview_image: r.preview_image,
            content: r.content,
            show_at_index: r.show_at_index,
            is_published: r.is_published,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub id: i32,
    pub title: String,
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: bool,
    pub is_published: bool,
    pub created_at: String,
    pub modified_at: String,
}

impl From<ArticleModel> for ArticleResponse {
    fn from(a: ArticleModel) -> Self {
        Self {
            id: a.id,
            title: a.title,
            preview_image: a.preview_image,
            content: a.content,
            show_at_index: a.show_at_index,
            is_published: a.is_published,
            created_at: a.created_at.to_string(),
            modified_at: a.modified_at.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActionRequest {
    /// Selected article ids
    #[validate(length(min = 1))]
    pub ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResultResponse {
    pub action: String,
    /// Rows actually changed
    pub updated: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/articles",
    params(
        ("q" = Option<String>, Query, description = "Search in title"),
        ("show_at_index" = Option<bool>, Query, description = "Filter"),
        ("is_published" = Option<bool>, Query, description = "Filter"),
        ("created_at__year" = Option<i32>, Query, description = "Date hierarchy"),
        ("created_at__month" = Option<u32>, Query, description = "Date hierarchy"),
        ("created_at__day" = Option<u32>, Query, description = "Date hierarchy"),
        ("o" = Option<String>, Query, description = "Ordering, e.g. `-created_at`"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Article changelist", body = PaginatedResponse<serde_json::Value>),
        (status = 400, description = "Invalid filter", body = AppError),
    ),
    tag = "articles"
)]
pub async fn list_articles(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("article")?;
    let params = ListParams::new(raw);
    let page = ArticleService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/articles/{id}",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "articles"
)]
pub async fn get_article(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleService::new(db).get(id).await?;
    Ok(ApiResponse::ok(ArticleResponse::from(article)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/articles",
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "articles"
)]
pub async fn create_article(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<ArticleRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let article = ArticleService::new(db).create(payload.into()).await?;
    Ok(ApiResponse::ok(ArticleResponse::from(article)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/articles/{id}",
    params(("id" = i32, Path, description = "Article ID")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ArticleResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "articles"
)]
pub async fn update_article(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ArticleRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let article = ArticleService::new(db).update(id, payload.into()).await?;
    Ok(ApiResponse::ok(ArticleResponse::from(article)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/articles/{id}",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "articles"
)]
pub async fn delete_article(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    ArticleService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Article deleted successfully"))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/articles/actions/{action}",
    params(("action" = String, Path, description = "Registered action name")),
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Action applied", body = ActionResultResponse),
        (status = 400, description = "Nothing selected", body = AppError),
        (status = 404, description = "Unknown action", body = AppError),
    ),
    tag = "articles"
)]
pub async fn run_article_action(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Path(action): Path<String>,
    Json(payload): Json<ActionRequest>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("article")?;
    let action = admin.find_action(&action).ok_or(AppError::NotFound)?;
    payload.validate()?;

    let updated = match action.name {
        MAKE_PUBLISHED => ArticleService::new(db).make_published(&payload.ids).await?,
        _ => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::with_message(
        ActionResultResponse {
            action: action.name.to_string(),
            updated,
        },
        format!("{} article(s) marked as published", updated),
    ))
}
