use crate::config::rate_limit::{RateLimitConfig, RateLimitRule};
use crate::handlers;
use crate::services::media::MAX_FILE_SIZE;
use axum::{extract::DefaultBodyLimit, routing, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

pub fn create_routes(rate_limit: RateLimitConfig) -> Router {
    Router::new().nest("/api/v1", api_routes(rate_limit))
}

fn api_routes(config: RateLimitConfig) -> Router {
    read_routes(&config).merge(write_routes(&config))
}

/// Registry and changelist reads.
fn read_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Registry
        .route("/admin/models", routing::get(handlers::admin::list_models))
        .route(
            "/admin/models/{model}",
            routing::get(handlers::admin::get_model),
        )
        // Articles
        .route(
            "/admin/articles",
            routing::get(handlers::article::list_articles),
        )
        .route(
            "/admin/articles/{id}",
            routing::get(handlers::article::get_article),
        )
        // Lookups
        .route("/admin/tags", routing::get(handlers::tag::list_tags))
        .route("/admin/tags/{id}", routing::get(handlers::tag::get_tag))
        .route(
            "/admin/social-channels",
            routing::get(handlers::social_channel::list_social_channels),
        )
        .route(
            "/admin/social-channels/{id}",
            routing::get(handlers::social_channel::get_social_channel),
        )
        .route(
            "/admin/cuisine-types",
            routing::get(handlers::cuisine_type::list_cuisine_types),
        )
        .route(
            "/admin/cuisine-types/{id}",
            routing::get(handlers::cuisine_type::get_cuisine_type),
        )
        .route(
            "/admin/restaurant-categories",
            routing::get(handlers::restaurant_category::list_restaurant_categories),
        )
        .route(
            "/admin/restaurant-categories/{id}",
            routing::get(handlers::restaurant_category::get_restaurant_category),
        )
        // Restaurants
        .route(
            "/admin/restaurants",
            routing::get(handlers::restaurant::list_restaurants),
        )
        .route(
            "/admin/restaurants/{id}",
            routing::get(handlers::restaurant::get_restaurant),
        )
        .route(
            "/admin/restaurants/{id}/menus",
            routing::get(handlers::restaurant::list_menus),
        )
        .route(
            "/admin/restaurants/{id}/images",
            routing::get(handlers::restaurant::list_images),
        )
        // Reviews
        .route("/admin/reviews", routing::get(handlers::review::list_reviews))
        .route(
            "/admin/reviews/{id}",
            routing::get(handlers::review::get_review),
        )
        .route(
            "/admin/reviews/{id}/images",
            routing::get(handlers::review::list_review_images),
        );

    with_optional_rate_limit(router, config.enabled, config.read)
}

/// Everything that changes stored data.
fn write_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Articles
        .route(
            "/admin/articles",
            routing::post(handlers::article::create_article),
        )
        .route(
            "/admin/articles/{id}",
            routing::put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        )
        .route(
            "/admin/articles/actions/{action}",
            routing::post(handlers::article::run_article_action),
        )
        // Lookups
        .route("/admin/tags", routing::post(handlers::tag::create_tag))
        .route(
            "/admin/tags/{id}",
            routing::put(handlers::tag::update_tag).delete(handlers::tag::delete_tag),
        )
        .route(
            "/admin/social-channels",
            routing::post(handlers::social_channel::create_social_channel),
        )
        .route(
            "/admin/social-channels/{id}",
            routing::put(handlers::social_channel::update_social_channel)
                .delete(handlers::social_channel::delete_social_channel),
        )
        .route(
            "/admin/cuisine-types",
            routing::post(handlers::cuisine_type::create_cuisine_type),
        )
        .route(
            "/admin/cuisine-types/{id}",
            routing::put(handlers::cuisine_type::update_cuisine_type)
                .delete(handlers::cuisine_type::delete_cuisine_type),
        )
        .route(
            "/admin/restaurant-categories",
            routing::post(handlers::restaurant_category::create_restaurant_category),
        )
        .route(
            "/admin/restaurant-categories/{id}",
            routing::put(handlers::restaurant_category::update_restaurant_category)
                .delete(handlers::restaurant_category::delete_restaurant_category),
        )
        // Restaurants and their inlines
        .route(
            "/admin/restaurants",
            routing::post(handlers::restaurant::create_restaurant),
        )
        .route(
            "/admin/restaurants/{id}",
            routing::put(handlers::restaurant::update_restaurant)
                .delete(handlers::restaurant::delete_restaurant),
        )
        .route(
            "/admin/restaurants/{id}/menus",
            routing::post(handlers::restaurant::create_menu),
        )
        .route(
            "/admin/restaurant-menus/{id}",
            routing::put(handlers::restaurant::update_menu)
                .delete(handlers::restaurant::delete_menu),
        )
        .route(
            "/admin/restaurants/{id}/images",
            routing::post(handlers::restaurant::create_image),
        )
        .route(
            "/admin/restaurant-images/{id}",
            routing::put(handlers::restaurant::update_image)
                .delete(handlers::restaurant::delete_image),
        )
        // Reviews and their images
        .route(
            "/admin/reviews",
            routing::post(handlers::review::create_review),
        )
        .route(
            "/admin/reviews/{id}",
            routing::put(handlers::review::update_review)
                .delete(handlers::review::delete_review),
        )
        .route(
            "/admin/reviews/{id}/images",
            routing::post(handlers::review::add_review_image),
        )
        .route(
            "/admin/review-images/{id}",
            routing::delete(handlers::review::delete_review_image),
        )
        // Media; the body limit leaves room for multipart framing
        .route(
            "/admin/media/{category}",
            routing::post(handlers::media::upload_media)
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 64 * 1024)),
        );

    with_optional_rate_limit(router, config.enabled, config.write)
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    match GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
    {
        Some(governor_conf) => router.layer(GovernorLayer::new(governor_conf)),
        None => {
            tracing::warn!("Invalid rate limit rule {:?}, serving without limit", rule);
            router
        }
    }
}
