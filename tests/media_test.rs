mod common;

use reqwest::multipart::{Form, Part};

const PNG: [u8; 16] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

fn form(data: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(data)
        .file_name("upload.bin")
        .mime_str(mime)
        .unwrap();
    Form::new().part("file", part)
}

#[tokio::test]
async fn uploaded_image_is_served() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let resp = app
        .client
        .post(app.url("/admin/media/review_profile"))
        .multipart(form(PNG.to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();

    let path = body["data"]["path"].as_str().unwrap().to_string();
    assert!(path.starts_with("review_profile/"));
    assert!(path.ends_with(".png"));
    assert_eq!(body["data"]["url"], format!("/media/{}", path));

    let served = app
        .client
        .get(format!("{}/media/{}", app.addr, path))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), &PNG[..]);
}

#[tokio::test]
async fn rejects_unknown_category_and_non_images() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let resp = app
        .client
        .post(app.url("/admin/media/avatars"))
        .multipart(form(PNG.to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = app
        .client
        .post(app.url("/admin/media/article"))
        .multipart(form(b"plain text".to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = app
        .client
        .post(app.url("/admin/media/article"))
        .multipart(Form::new().text("note", "no file here"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let mut data = PNG.to_vec();
    data.resize(5 * 1024 * 1024 + 1, 0);
    let resp = app
        .client
        .post(app.url("/admin/media/restaurant_image"))
        .multipart(form(data, "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 413);
}
