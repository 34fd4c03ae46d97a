mod common;

use common::{decimal, items, unique};
use restaurant_admin::models::{review, review_image, Review, ReviewImage};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde_json::json;
use std::sync::Arc;

async fn rating_of(app: &common::TestApp, restaurant_id: i64) -> (f64, i64) {
    let (_, body) = app
        .get(&format!("/admin/restaurants/{}", restaurant_id))
        .await;
    (
        decimal(&body["data"]["rating"]),
        body["data"]["rating_count"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn rating_follows_reviews() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let restaurant = app.create_restaurant(&unique("Rated")).await;

    let five = app.create_review(restaurant, 5).await;
    app.create_review(restaurant, 4).await;
    app.create_review(restaurant, 4).await;
    assert_eq!(rating_of(&app, restaurant).await, (4.33, 3));

    assert_eq!(app.delete(&format!("/admin/reviews/{}", five)).await, 200);
    assert_eq!(rating_of(&app, restaurant).await, (4.0, 2));
}

#[tokio::test]
async fn concurrent_reviews_are_all_counted() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let app = Arc::new(app);
    let restaurant = app.create_restaurant(&unique("Busy")).await;

    let writers: Vec<_> = (0..20)
        .map(|i| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { app.create_review(restaurant, 1 + i % 5).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap();
    }

    let stored = Review::find()
        .filter(review::Column::RestaurantId.eq(restaurant as i32))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(stored, 20);
    // Ratings 1..=5 four times each.
    assert_eq!(rating_of(&app, restaurant).await, (3.0, 20));
}

#[tokio::test]
async fn store_rejects_rating_outside_one_to_five() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let restaurant = app.create_restaurant(&unique("Check")).await as i32;
    let now = chrono::Utc::now().naive_utc();

    for rating in [0, 6] {
        let row = review::ActiveModel {
            restaurant_id: Set(restaurant),
            title: Set("Bypassing the API".to_string()),
            author: Set("tester".to_string()),
            content: Set("x".to_string()),
            rating: Set(rating),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        assert!(row.insert(&app.db).await.is_err(), "rating {}", rating);
    }
}

#[tokio::test]
async fn moving_a_review_refreshes_both_restaurants() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let from = app.create_restaurant(&unique("From")).await;
    let to = app.create_restaurant(&unique("To")).await;
    let review = app.create_review(from, 3).await;

    let (status, body) = app
        .put(
            &format!("/admin/reviews/{}", review),
            &json!({
                "restaurant_id": to,
                "title": "Moved",
                "author": "tester",
                "content": "Wrong restaurant at first",
                "rating": 5,
            }),
        )
        .await;
    assert_eq!(status, 200, "{}", body);

    assert_eq!(rating_of(&app, from).await, (0.0, 0));
    assert_eq!(rating_of(&app, to).await, (5.0, 1));
}

#[tokio::test]
async fn rating_outside_one_to_five_is_rejected() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let restaurant = app.create_restaurant(&unique("Strict")).await;

    for rating in [0, 6] {
        let (status, _) = app
            .post(
                "/admin/reviews",
                &json!({
                    "restaurant_id": restaurant,
                    "title": "Out of range",
                    "author": "tester",
                    "content": "x",
                    "rating": rating,
                }),
            )
            .await;
        assert_eq!(status, 400, "rating {}", rating);
    }
    assert_eq!(rating_of(&app, restaurant).await, (0.0, 0));
}

#[tokio::test]
async fn changelist_shows_restaurant_and_partial_content() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let name = unique("Listed");
    let restaurant = app.create_restaurant(&name).await;
    let author = unique("author");

    let older = app
        .create(
            "/admin/reviews",
            json!({
                "restaurant_id": restaurant,
                "title": "First visit",
                "author": author,
                "content": "The noodles were great and the broth was even better",
                "rating": 4,
            }),
        )
        .await;
    let newer = app
        .create(
            "/admin/reviews",
            json!({
                "restaurant_id": restaurant,
                "title": "Second visit",
                "author": author,
                "content": "Short",
                "rating": 5,
            }),
        )
        .await;

    let (status, body) = app.get(&format!("/admin/reviews?q={}", author)).await;
    assert_eq!(status, 200, "{}", body);
    let rows = items(&body);
    assert_eq!(rows.len(), 2);

    // Newest first by default.
    assert_eq!(rows[0]["id"], newer["id"]);
    assert_eq!(rows[1]["id"], older["id"]);

    assert_eq!(rows[1]["restaurant_name"], name.as_str());
    assert_eq!(rows[1]["content_partial"], "The noodles were gre");
    assert_eq!(rows[0]["content_partial"], "Short");

    let mut keys: Vec<&str> = rows[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["author", "content_partial", "id", "rating", "restaurant_name"]
    );

    // Virtual columns cannot be ordered on.
    let (status, _) = app.get("/admin/reviews?o=content_partial").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn social_channel_filter_and_detach() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let restaurant = app.create_restaurant(&unique("Social")).await;
    let author = unique("blogger");
    let channel = app
        .create("/admin/social-channels", json!({ "name": unique("blog") }))
        .await["id"]
        .as_i64()
        .unwrap();

    let from_channel = app
        .create(
            "/admin/reviews",
            json!({
                "restaurant_id": restaurant,
                "title": "Posted",
                "author": author,
                "content": "Seen on a blog",
                "rating": 3,
                "social_channel_id": channel,
            }),
        )
        .await;
    app.create(
        "/admin/reviews",
        json!({
            "restaurant_id": restaurant,
            "title": "Walk-in",
            "author": author,
            "content": "No channel",
            "rating": 4,
        }),
    )
    .await;

    let (_, body) = app
        .get(&format!(
            "/admin/reviews?q={}&social_channel_id={}",
            author, channel
        ))
        .await;
    let rows = items(&body);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], from_channel["id"]);

    let (_, body) = app
        .get(&format!("/admin/reviews?q={}&social_channel_id=null", author))
        .await;
    assert_eq!(items(&body).len(), 1);

    assert_eq!(
        app.delete(&format!("/admin/social-channels/{}", channel))
            .await,
        200
    );
    let (status, body) = app
        .get(&format!("/admin/reviews/{}", from_channel["id"]))
        .await;
    assert_eq!(status, 200);
    assert!(body["data"]["social_channel_id"].is_null());
}

#[tokio::test]
async fn review_images_cascade_with_review() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let restaurant = app.create_restaurant(&unique("Photo")).await;
    let review = app.create_review(restaurant, 5).await;

    let first = app
        .create(
            &format!("/admin/reviews/{}/images", review),
            json!({ "image": "review_images/one.jpg" }),
        )
        .await;
    app.create(
        &format!("/admin/reviews/{}/images", review),
        json!({ "image": "review_images/two.jpg" }),
    )
    .await;

    let (_, body) = app.get(&format!("/admin/reviews/{}/images", review)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    assert_eq!(
        app.delete(&format!("/admin/review-images/{}", first["id"]))
            .await,
        200
    );
    assert_eq!(app.delete(&format!("/admin/reviews/{}", review)).await, 200);

    let left = ReviewImage::find()
        .filter(review_image::Column::ReviewId.eq(review as i32))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(left, 0);
}
