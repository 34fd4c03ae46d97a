mod common;

use chrono::Datelike;
use common::{items, unique};
use serde_json::json;

async fn create_article(app: &common::TestApp, title: &str, is_published: bool) -> i64 {
    let data = app
        .create(
            "/admin/articles",
            json!({
                "title": title,
                "content": "Where to eat this spring",
                "is_published": is_published,
            }),
        )
        .await;
    data["id"].as_i64().unwrap()
}

#[tokio::test]
async fn make_published_touches_only_selected() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let token = unique("pub");

    let a = create_article(&app, &format!("{} a", token), false).await;
    let b = create_article(&app, &format!("{} b", token), true).await;
    let c = create_article(&app, &format!("{} c", token), false).await;

    let (_, before) = app.get(&format!("/admin/articles/{}", a)).await;

    let (status, body) = app
        .post(
            "/admin/articles/actions/make_published",
            &json!({ "ids": [a, b] }),
        )
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["updated"], 2);

    let (_, body) = app.get(&format!("/admin/articles/{}", a)).await;
    assert_eq!(body["data"]["is_published"], true);
    assert_ne!(body["data"]["modified_at"], before["data"]["modified_at"]);
    assert_eq!(body["data"]["created_at"], before["data"]["created_at"]);

    let (_, body) = app.get(&format!("/admin/articles/{}", b)).await;
    assert_eq!(body["data"]["is_published"], true);

    let (_, body) = app.get(&format!("/admin/articles/{}", c)).await;
    assert_eq!(body["data"]["is_published"], false);
}

#[tokio::test]
async fn action_rejects_empty_selection_and_unknown_names() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let (status, _) = app
        .post("/admin/articles/actions/make_published", &json!({ "ids": [] }))
        .await;
    assert_eq!(status, 400);

    let (status, _) = app
        .post("/admin/articles/actions/delete_everything", &json!({ "ids": [1] }))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn changelist_search_filter_and_columns() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let token = unique("srch");

    create_article(&app, &format!("{} Spring Menu", token.to_uppercase()), true).await;
    create_article(&app, &format!("{} winter menu", token), false).await;

    // Search is case-insensitive.
    let (status, body) = app.get(&format!("/admin/articles?q={}", token)).await;
    assert_eq!(status, 200, "{}", body);
    let rows = items(&body);
    assert_eq!(rows.len(), 2);

    let row = rows[0].as_object().unwrap();
    let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "created_at",
            "id",
            "is_published",
            "modified_at",
            "show_at_index",
            "title"
        ]
    );

    let (_, body) = app
        .get(&format!("/admin/articles?q={}&is_published=false", token))
        .await;
    let rows = items(&body);
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["title"].as_str().unwrap().ends_with("winter menu"));

    let (status, _) = app.get("/admin/articles?is_published=perhaps").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn changelist_date_hierarchy() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let token = unique("date");
    create_article(&app, &token, false).await;

    let year = chrono::Utc::now().year();
    let (_, body) = app
        .get(&format!("/admin/articles?q={}&created_at__year={}", token, year))
        .await;
    assert_eq!(items(&body).len(), 1);

    let (_, body) = app
        .get(&format!("/admin/articles?q={}&created_at__year=1999", token))
        .await;
    assert!(items(&body).is_empty());

    let (status, _) = app
        .get("/admin/articles?created_at__year=2023&created_at__month=2&created_at__day=30")
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn update_and_delete_article() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let id = create_article(&app, &unique("edit"), false).await;

    let (status, body) = app
        .put(
            &format!("/admin/articles/{}", id),
            &json!({
                "title": "Renamed",
                "content": "Updated body",
                "show_at_index": true,
            }),
        )
        .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["show_at_index"], true);

    let (status, _) = app
        .put(
            &format!("/admin/articles/{}", id),
            &json!({ "title": "", "content": "x" }),
        )
        .await;
    assert_eq!(status, 400);

    assert_eq!(app.delete(&format!("/admin/articles/{}", id)).await, 200);
    let (status, _) = app.get(&format!("/admin/articles/{}", id)).await;
    assert_eq!(status, 404);
}
