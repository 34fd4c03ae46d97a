use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use restaurant_admin::config::media::MediaConfig;
use restaurant_admin::config::rate_limit::RateLimitConfig;
use restaurant_admin::{config, default_registry, migration, routes};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Registry
        restaurant_admin::handlers::admin::list_models,
        restaurant_admin::handlers::admin::get_model,
        // Articles
        restaurant_admin::handlers::article::list_articles,
        restaurant_admin::handlers::article::get_article,
        restaurant_admin::handlers::article::create_article,
        restaurant_admin::handlers::article::update_article,
        restaurant_admin::handlers::article::delete_article,
        restaurant_admin::handlers::article::run_article_action,
        // Tags
        restaurant_admin::handlers::tag::list_tags,
        restaurant_admin::handlers::tag::get_tag,
        restaurant_admin::handlers::tag::create_tag,
        restaurant_admin::handlers::tag::update_tag,
        restaurant_admin::handlers::tag::delete_tag,
        // Social channels
        restaurant_admin::handlers::social_channel::list_social_channels,
        restaurant_admin::handlers::social_channel::get_social_channel,
        restaurant_admin::handlers::social_channel::create_social_channel,
        restaurant_admin::handlers::social_channel::update_social_channel,
        restaurant_admin::handlers::social_channel::delete_social_channel,
        // Cuisine types
        restaurant_admin::handlers::cuisine_type::list_cuisine_types,
        restaurant_admin::handlers::cuisine_type::get_cuisine_type,
        restaurant_admin::handlers::cuisine_type::create_cuisine_type,
        restaurant_admin::handlers::cuisine_type::update_cuisine_type,
        restaurant_admin::handlers::cuisine_type::delete_cuisine_type,
        // Restaurant categories
        restaurant_admin::handlers::restaurant_category::list_restaurant_categories,
        restaurant_admin::handlers::restaurant_category::get_restaurant_category,
        restaurant_admin::handlers::restaurant_category::create_restaurant_category,
        restaurant_admin::handlers::restaurant_category::update_restaurant_category,
        restaurant_admin::handlers::restaurant_category::delete_restaurant_category,
        // Restaurants
        restaurant_admin::handlers::restaurant::list_restaurants,
        restaurant_admin::handlers::restaurant::get_restaurant,
        restaurant_admin::handlers::restaurant::create_restaurant,
        restaurant_admin::handlers::restaurant::update_restaurant,
        restaurant_admin::handlers::restaurant::delete_restaurant,
        restaurant_admin::handlers::restaurant::list_menus,
        restaurant_admin::handlers::restaurant::create_menu,
        restaurant_admin::handlers::restaurant::update_menu,
        restaurant_admin::handlers::restaurant::delete_menu,
        restaurant_admin::handlers::restaurant::list_images,
        restaurant_admin::handlers::restaurant::create_image,
        restaurant_admin::handlers::restaurant::update_image,
        restaurant_admin::handlers::restaurant::delete_image,
        // Reviews
        restaurant_admin::handlers::review::list_reviews,
        restaurant_admin::handlers::review::get_review,
        restaurant_admin::handlers::review::create_review,
        restaurant_admin::handlers::review::update_review,
        restaurant_admin::handlers::review::delete_review,
        restaurant_admin::handlers::review::list_review_images,
        restaurant_admin::handlers::review::add_review_image,
        restaurant_admin::handlers::review::delete_review_image,
        // Media
        restaurant_admin::handlers::media::upload_media,
    ),
    components(
        schemas(
            restaurant_admin::response::ApiResponse<serde_json::Value>,
            restaurant_admin::response::PaginatedResponse<serde_json::Value>,
            restaurant_admin::error::AppError,
            // Registry
            restaurant_admin::handlers::admin::ModelAdminResponse,
            restaurant_admin::handlers::admin::ListFilterResponse,
            restaurant_admin::handlers::admin::InlineResponse,
            restaurant_admin::handlers::admin::ActionResponse,
            // Articles
            restaurant_admin::handlers::article::ArticleRequest,
            restaurant_admin::handlers::article::ArticleResponse,
            restaurant_admin::handlers::article::ActionRequest,
            restaurant_admin::handlers::article::ActionResultResponse,
            // Lookups
            restaurant_admin::handlers::tag::TagRequest,
            restaurant_admin::handlers::tag::TagResponse,
            restaurant_admin::handlers::social_channel::SocialChannelRequest,
            restaurant_admin::handlers::social_channel::SocialChannelResponse,
            restaurant_admin::handlers::cuisine_type::CuisineTypeRequest,
            restaurant_admin::handlers::cuisine_type::CuisineTypeResponse,
            restaurant_admin::handlers::restaurant_category::RestaurantCategoryRequest,
            restaurant_admin::handlers::restaurant_category::RestaurantCategoryResponse,
            // Restaurants
            restaurant_admin::handlers::restaurant::RestaurantRequest,
            restaurant_admin::handlers::restaurant::RestaurantResponse,
            restaurant_admin::handlers::restaurant::MenuRequest,
            restaurant_admin::handlers::restaurant::MenuResponse,
            restaurant_admin::handlers::restaurant::ImageRequest,
            restaurant_admin::handlers::restaurant::ImageResponse,
            // Reviews
            restaurant_admin::handlers::review::ReviewRequest,
            restaurant_admin::handlers::review::ReviewResponse,
            restaurant_admin::handlers::review::ReviewImageRequest,
            restaurant_admin::handlers::review::ReviewImageResponse,
            // Media
            restaurant_admin::handlers::media::MediaResponse,
        )
    ),
    tags(
        (name = "admin", description = "Model registry"),
        (name = "articles", description = "Editorial articles"),
        (name = "tags", description = "Restaurant tags"),
        (name = "social_channels", description = "Review source channels"),
        (name = "cuisine_types", description = "Cuisine types"),
        (name = "restaurant_categories", description = "Restaurant categories"),
        (name = "restaurants", description = "Restaurants, menus and images"),
        (name = "reviews", description = "Reviews and review images"),
        (name = "media", description = "Image uploads"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let media = validate_config()?;

    tracing::info!("Starting restaurant admin v{}...", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(default_registry()?);
    tracing::info!("Admin registry built with {} models", registry.len());

    let db = config::database::get_database().await?;
    tracing::info!("Database connected successfully");

    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let app = create_app(&media, RateLimitConfig::from_env())
        .layer(Extension(db))
        .layer(Extension(registry))
        .layer(Extension(media));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "restaurant_admin=debug,tower_http=debug,axum=debug".into());

    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Validate required configuration at startup (fail-fast).
fn validate_config() -> anyhow::Result<MediaConfig> {
    if env::var("DATABASE_URL").is_err() {
        return Err(anyhow::anyhow!(
            "DATABASE_URL environment variable must be set"
        ));
    }

    let media = MediaConfig::from_env();
    if media.url == "/" {
        return Err(anyhow::anyhow!("MEDIA_URL must not be the site root"));
    }
    std::fs::create_dir_all(&media.root).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create media directory '{}': {}",
            media.root.display(),
            e
        )
    })?;

    Ok(media)
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app(media: &MediaConfig, rate_limit: RateLimitConfig) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(routes::create_routes(rate_limit))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(&media.url, ServeDir::new(&media.root))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check(Extension(db): Extension<DatabaseConnection>) -> impl IntoResponse {
    let db_ok = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT 1".to_string(),
        ))
        .await
        .is_ok();

    let status = if db_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "Restaurant Admin API",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_ok,
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
