mod common;

use common::{items, unique};
use serde_json::json;

#[tokio::test]
async fn deleting_cuisine_removes_its_categories() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let cuisine = app
        .create("/admin/cuisine-types", json!({ "name": unique("kr") }))
        .await["id"]
        .as_i64()
        .unwrap();
    let category = app
        .create(
            "/admin/restaurant-categories",
            json!({ "name": unique("soup"), "cuisine_type_id": cuisine }),
        )
        .await;
    app.create(
        "/admin/restaurant-categories",
        json!({ "name": unique("loose") }),
    )
    .await;

    let (_, body) = app
        .get(&format!(
            "/admin/restaurant-categories?cuisine_type_id={}",
            cuisine
        ))
        .await;
    let rows = items(&body);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], category["id"]);

    assert_eq!(
        app.delete(&format!("/admin/cuisine-types/{}", cuisine))
            .await,
        200
    );
    let (status, _) = app
        .get(&format!("/admin/restaurant-categories/{}", category["id"]))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn name_limits_are_enforced() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let (status, _) = app
        .post(
            "/admin/cuisine-types",
            &json!({ "name": "x".repeat(21) }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = app.post("/admin/tags", &json!({ "name": "" })).await;
    assert_eq!(status, 400);

    let (status, _) = app
        .post(
            "/admin/restaurant-categories",
            &json!({ "name": unique("nope"), "cuisine_type_id": i32::MAX }),
        )
        .await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn tag_crud() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let name = unique("tag");

    let tag = app.create("/admin/tags", json!({ "name": name })).await;
    let id = tag["id"].as_i64().unwrap();

    let (_, body) = app.get(&format!("/admin/tags?q={}", name)).await;
    assert_eq!(items(&body).len(), 1);

    let renamed = unique("renamed");
    let (status, body) = app
        .put(&format!("/admin/tags/{}", id), &json!({ "name": renamed }))
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["name"], renamed.as_str());

    assert_eq!(app.delete(&format!("/admin/tags/{}", id)).await, 200);
    let (status, _) = app.get(&format!("/admin/tags/{}", id)).await;
    assert_eq!(status, 404);
    assert_eq!(app.delete(&format!("/admin/tags/{}", id)).await, 404);
}

#[tokio::test]
async fn registry_describes_models() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let (status, body) = app.get("/admin/models").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 7);

    let (status, body) = app.get("/admin/models/review").await;
    assert_eq!(status, 200);
    let review = &body["data"];
    assert_eq!(review["ordering"], json!(["-created_at"]));
    assert_eq!(review["inlines"][0]["model"], "review_image");
    assert_eq!(review["inlines"][0]["extra"], 1);
    assert_eq!(review["list_filter"][0]["field"], "social_channel_id");
    assert_eq!(review["list_filter"][0]["kind"], "foreign_key");

    let (_, body) = app.get("/admin/models/article").await;
    assert_eq!(body["data"]["actions"][0]["name"], "make_published");
    assert_eq!(body["data"]["date_hierarchy"], "created_at");

    let (status, _) = app.get("/admin/models/restaurant_menu").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn paging_is_bounded() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let token = unique("page");
    for i in 0..3 {
        app.create("/admin/tags", json!({ "name": format!("{}-{}", token, i) }))
            .await;
    }

    let (status, body) = app
        .get(&format!("/admin/tags?q={}&per_page=2&page=2", token))
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(items(&body).len(), 1);

    let (status, _) = app.get("/admin/tags?page=0").await;
    assert_eq!(status, 400);
}
