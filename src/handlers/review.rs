use super::changelist;
use crate::admin::{AdminRegistry, ListParams};
use crate::error::{AppError, AppResult};
use crate::models::{ReviewImageModel, ReviewModel};
use crate::response::{ApiResponse, PaginatedResponse};
use crate::services::review::{ReviewFields, ReviewService};
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
pub struct ReviewRequest {
    pub restaurant_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    /// Stored media path of the author's profile picture
    #[validate(length(max = 100))]
    pub profile_image: Option<String>,
    pub content: String,
    /// 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    pub social_channel_id: Option<i32>,
}

impl From<ReviewRequest> for ReviewFields {
    fn from(r: ReviewRequest) -> Self {
        Self {
            restaurant_id: r.restaurant_id,
            title: r.title,
            author: r.author,
            profile_image: r.profile_image,
            content: r.content,
            rating: r.rating,
            social_channel_id: r.social_channel_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    /// First 20 characters of `content`
    pub content_partial: String,
    pub rating: i16,
    pub social_channel_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewModel> for ReviewResponse {
    fn from(r: ReviewModel) -> Self {
        Self {
            content_partial: r.content_partial(),
            id: r.id,
            restaurant_id: r.restaurant_id,
            title: r.title,
            author: r.author,
            profile_image: r.profile_image,
            content: r.content,
            rating: r.rating,
            social_channel_id: r.social_channel_id,
            created_at: r.created_at.to_string(),
            updated_at: r.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewImageRequest {
    /// Stored media path
    #[validate(length(min = 1, max = 100))]
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewImageResponse {
    pub id: i32,
    pub review_id: i32,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewImageModel> for ReviewImageResponse {
    fn from(i: ReviewImageModel) -> Self {
        Self {
            id: i.id,
            review_id: i.review_id,
            image: i.image,
            created_at: i.created_at.to_string(),
            updated_at: i.updated_at.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/reviews",
    params(
        ("q" = Option<String>, Query, description = "Search in title and author"),
        ("social_channel_id" = Option<String>, Query, description = "Social channel id or `null`"),
        ("o" = Option<String>, Query, description = "Ordering, default `-created_at`"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Review changelist", body = PaginatedResponse<serde_json::Value>),
        (status = 400, description = "Invalid filter", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    Extension(db): Extension<DatabaseConnection>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get("review")?;
    let params = ListParams::new(raw);
    let page = ReviewService::new(db).list(admin, &params).await?;
    Ok(ApiResponse::ok(changelist(page, admin)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = ReviewResponse),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn get_review(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewService::new(db).get(id).await?;
    Ok(ApiResponse::ok(ReviewResponse::from(review)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Unknown restaurant or channel", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn create_review(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let review = ReviewService::new(db).create(payload.into()).await?;
    Ok(ApiResponse::ok(ReviewResponse::from(review)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn update_review(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let review = ReviewService::new(db).update(id, payload.into()).await?;
    Ok(ApiResponse::ok(ReviewResponse::from(review)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review and its images deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    ReviewService::new(db).delete(id).await?;
    Ok(ApiResponse::ok("Review deleted successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/reviews/{id}/images",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Images attached to the review", body = Vec<ReviewImageResponse>),
        (status = 404, description = "Review not found", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn list_review_images(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = ReviewService::new(db);
    service.get(id).await?;
    let images = service.list_images(id).await?;
    let items: Vec<ReviewImageResponse> =
        images.into_iter().map(ReviewImageResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/reviews/{id}/images",
    params(("id" = i32, Path, description = "Review ID")),
    request_body = ReviewImageRequest,
    responses(
        (status = 200, description = "Image attached", body = ReviewImageResponse),
        (status = 404, description = "Review not found", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn add_review_image(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewImageRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let image = ReviewService::new(db).add_image(id, payload.image).await?;
    Ok(ApiResponse::ok(ReviewImageResponse::from(image)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/review-images/{id}",
    params(("id" = i32, Path, description = "Review image ID")),
    responses(
        (status = 200, description = "Image deleted", body = String),
        (status = 404, description = "Not found", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn delete_review_image(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    ReviewService::new(db).delete_image(id).await?;
    Ok(ApiResponse::ok("Image deleted successfully"))
}
