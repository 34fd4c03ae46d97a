mod common;

use common::{decimal, items, unique};
use restaurant_admin::models::{restaurant_image, restaurant_menu, review};
use restaurant_admin::models::{RestaurantImage, RestaurantMenu, Review};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

#[tokio::test]
async fn new_restaurant_starts_unrated() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let name = unique("Mugyo");

    let data = app
        .create(
            "/admin/restaurants",
            json!({
                "name": name,
                "branch_name": "Gangnam",
                "feature": "Beef bone soup",
                "phone": "+82212345678",
                "start_time": "11:00",
                "last_order_time": "20:30:00",
            }),
        )
        .await;

    assert_eq!(decimal(&data["rating"]), 0.0);
    assert_eq!(data["rating_count"], 0);
    assert_eq!(decimal(&data["latitude"]), 0.0);
    assert_eq!(decimal(&data["longitude"]), 0.0);
    assert_eq!(data["is_closed"], false);
    assert_eq!(data["display_name"], format!("{}-Gangnam", name));
    assert_eq!(data["start_time"], "11:00:00");
    assert_eq!(data["last_order_time"], "20:30:00");
    assert!(data["end_time"].is_null());

    let id = app.create_restaurant(&unique("Solo")).await;
    let (_, body) = app.get(&format!("/admin/restaurants/{}", id)).await;
    assert_eq!(body["data"]["display_name"], body["data"]["name"]);
}

#[tokio::test]
async fn rejects_invalid_restaurant_input() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let (status, _) = app
        .post(
            "/admin/restaurants",
            &json!({
                "name": unique("Long"),
                "feature": "x",
                "phone": "+8201234567890123",
            }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = app
        .post(
            "/admin/restaurants",
            &json!({
                "name": unique("Time"),
                "feature": "x",
                "phone": "+8221234567",
                "start_time": "25:00",
            }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = app
        .post(
            "/admin/restaurants",
            &json!({
                "name": unique("Orphan"),
                "feature": "x",
                "phone": "+8221234567",
                "category_id": i32::MAX,
            }),
        )
        .await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn tags_filter_and_replacement() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let token = unique("tagged");

    let spicy = app.create("/admin/tags", json!({ "name": unique("spicy") })).await["id"]
        .as_i64()
        .unwrap();
    let cozy = app.create("/admin/tags", json!({ "name": unique("cozy") })).await["id"]
        .as_i64()
        .unwrap();

    let tagged = app
        .create(
            "/admin/restaurants",
            json!({
                "name": format!("{} one", token),
                "feature": "x",
                "phone": "+8221234567",
                "tags": [spicy, spicy],
            }),
        )
        .await;
    assert_eq!(tagged["tags"], json!([spicy]));
    let tagged_id = tagged["id"].as_i64().unwrap();
    app.create_restaurant(&format!("{} two", token)).await;

    let (_, body) = app
        .get(&format!("/admin/restaurants?q={}&tags={}", token, spicy))
        .await;
    let rows = items(&body);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], tagged_id);

    // Omitting tags keeps the current set.
    let (status, body) = app
        .put(
            &format!("/admin/restaurants/{}", tagged_id),
            &json!({
                "name": format!("{} one", token),
                "feature": "renamed",
                "phone": "+8221234567",
            }),
        )
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["tags"], json!([spicy]));

    let (_, body) = app
        .put(
            &format!("/admin/restaurants/{}", tagged_id),
            &json!({
                "name": format!("{} one", token),
                "feature": "renamed",
                "phone": "+8221234567",
                "tags": [cozy],
            }),
        )
        .await;
    assert_eq!(body["data"]["tags"], json!([cozy]));

    let (_, body) = app
        .get(&format!("/admin/restaurants?q={}&tags={}", token, spicy))
        .await;
    assert!(items(&body).is_empty());
}

#[tokio::test]
async fn menus_and_images_inline() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let id = app.create_restaurant(&unique("Inline")).await;

    let (status, _) = app
        .post(
            &format!("/admin/restaurants/{}/menus", id),
            &json!({ "name": "Gomtang", "price": -1 }),
        )
        .await;
    assert_eq!(status, 400);

    let menu = app
        .create(
            &format!("/admin/restaurants/{}/menus", id),
            json!({ "name": "Gomtang", "price": 12000 }),
        )
        .await;
    assert_eq!(menu["restaurant_id"], id);

    let free = app
        .create(
            &format!("/admin/restaurants/{}/menus", id),
            json!({ "name": "Kimchi" }),
        )
        .await;
    assert_eq!(free["price"], 0);

    let (status, body) = app
        .put(
            &format!("/admin/restaurant-menus/{}", menu["id"]),
            &json!({ "name": "Gomtang (large)", "price": 15000 }),
        )
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["price"], 15000);

    app.create(
        &format!("/admin/restaurants/{}/images", id),
        json!({ "name": "second", "image": "restaurant_image/b.png", "display_order": 2 }),
    )
    .await;
    app.create(
        &format!("/admin/restaurants/{}/images", id),
        json!({
            "name": "first",
            "image": "restaurant_image/a.png",
            "is_representative": true,
            "display_order": 1,
        }),
    )
    .await;

    let (_, body) = app.get(&format!("/admin/restaurants/{}/images", id)).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second"]);

    let (_, body) = app.get(&format!("/admin/restaurants/{}", id)).await;
    assert_eq!(body["data"]["menus"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 2);

    assert_eq!(
        app.delete(&format!("/admin/restaurant-menus/{}", menu["id"]))
            .await,
        200
    );
    assert_eq!(
        app.delete(&format!("/admin/restaurant-menus/{}", menu["id"]))
            .await,
        404
    );
    let (status, _) = app
        .post(
            &format!("/admin/restaurants/{}/menus", i32::MAX),
            &json!({ "name": "Ghost", "price": 1 }),
        )
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn deleting_restaurant_cascades_to_children() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let id = app.create_restaurant(&unique("Gone")).await;

    app.create(
        &format!("/admin/restaurants/{}/menus", id),
        json!({ "name": "Naengmyeon", "price": 11000 }),
    )
    .await;
    app.create(
        &format!("/admin/restaurants/{}/images", id),
        json!({ "name": "front", "image": "restaurant_image/front.png" }),
    )
    .await;
    app.create_review(id, 4).await;

    assert_eq!(app.delete(&format!("/admin/restaurants/{}", id)).await, 200);

    let id = id as i32;
    let menus = RestaurantMenu::find()
        .filter(restaurant_menu::Column::RestaurantId.eq(id))
        .count(&app.db)
        .await
        .unwrap();
    let images = RestaurantImage::find()
        .filter(restaurant_image::Column::RestaurantId.eq(id))
        .count(&app.db)
        .await
        .unwrap();
    let reviews = Review::find()
        .filter(review::Column::RestaurantId.eq(id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!((menus, images, reviews), (0, 0, 0));
}

#[tokio::test]
async fn deleting_category_detaches_restaurants() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let category = app
        .create(
            "/admin/restaurant-categories",
            json!({ "name": unique("cat") }),
        )
        .await["id"]
        .as_i64()
        .unwrap();

    let restaurant = app
        .create(
            "/admin/restaurants",
            json!({
                "name": unique("Kept"),
                "feature": "x",
                "phone": "+8221234567",
                "category_id": category,
            }),
        )
        .await;
    assert_eq!(restaurant["category_id"], category);

    assert_eq!(
        app.delete(&format!("/admin/restaurant-categories/{}", category))
            .await,
        200
    );

    let (status, body) = app
        .get(&format!("/admin/restaurants/{}", restaurant["id"]))
        .await;
    assert_eq!(status, 200);
    assert!(body["data"]["category_id"].is_null());
}
