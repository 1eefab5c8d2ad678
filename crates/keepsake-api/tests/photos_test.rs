mod helpers;

use axum::http::StatusCode;
use helpers::*;
use keepsake_core::MediaAsset;
use keepsake_core::StorageBackend;
use serde_json::Value;

#[tokio::test]
async fn test_upload_without_remote_falls_back_to_local() {
    let app = setup_test_app().await;

    let png = create_test_png(64, 48);
    let response = app.upload(png.clone(), "first-dance.png", "image/png").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let asset: MediaAsset = response.json();
    assert_eq!(asset.backend, StorageBackend::LocalFallback);
    assert!(asset.stored_url.is_none());
    assert!(asset.source_path.starts_with("photo-quest/"));
    assert!(asset.source_path.ends_with(".png"));
    assert_eq!(asset.url, format!("/media/{}", asset.source_path));
    assert_eq!(asset.original_filename, "first-dance.png");
    assert_eq!(asset.content_type, "image/png");
    assert_eq!(asset.size_bytes, png.len() as u64);

    let stored = app
        .state
        .local_storage
        .read(&asset.source_path)
        .await
        .expect("Local copy should exist");
    assert_eq!(stored, png);
}

#[tokio::test]
async fn test_upload_with_remote_returns_stored_url() {
    let mut remote = mockito::Server::new_async().await;
    let mock = remote
        .mock("POST", "/v1_1/demo/image/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"secure_url":"https://res.cloudinary.com/demo/image/upload/v1/wedding-photos/abc.jpg","public_id":"wedding-photos/abc"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let app = setup_test_app_with(Some(mock_remote(&remote.url())), |_| {}).await;
    let response = app
        .upload(create_test_png(32, 32), "toast.png", "image/png")
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let asset: MediaAsset = response.json();
    assert_eq!(asset.backend, StorageBackend::Remote);
    assert_eq!(
        asset.stored_url.as_deref(),
        Some("https://res.cloudinary.com/demo/image/upload/v1/wedding-photos/abc.jpg")
    );
    assert_eq!(asset.url, asset.stored_url.clone().unwrap());

    // The local original is kept either way.
    assert!(app.state.local_storage.read(&asset.source_path).await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_remote_failure_falls_back() {
    let mut remote = mockito::Server::new_async().await;
    remote
        .mock("POST", "/v1_1/demo/image/upload")
        .with_status(500)
        .with_body(r#"{"error":{"message":"Internal error"}}"#)
        .create_async()
        .await;

    let app = setup_test_app_with(Some(mock_remote(&remote.url())), |_| {}).await;
    let response = app
        .upload(create_test_png(16, 16), "cake.png", "image/png")
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let asset: MediaAsset = response.json();
    assert_eq!(asset.backend, StorageBackend::LocalFallback);
    assert!(asset.stored_url.is_none());
    assert!(asset.url.starts_with("/media/photo-quest/"));
}

#[tokio::test]
async fn test_upload_rejects_unknown_extension() {
    let app = setup_test_app().await;

    let response = app
        .upload(b"MZ not an image".to_vec(), "setup.exe", "image/png")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_rejects_wrong_content_type() {
    let app = setup_test_app().await;

    let response = app
        .upload(create_test_png(8, 8), "photo.png", "application/pdf")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_test_app_with(None, |config| config.max_file_size_bytes = 1024).await;

    let response = app
        .upload(vec![0u8; 4096], "huge.jpg", "image/jpeg")
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    use axum_test::multipart::MultipartForm;

    let app = setup_test_app().await;
    let form = MultipartForm::new().add_text("caption", "no file here");

    let response = app
        .client()
        .post(&api_path("/photos"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_remote_backend() {
    let app = setup_test_app().await;
    let body: Value = app.client().get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["remote_backend"], false);

    let app = setup_test_app_with(Some(mock_remote("http://127.0.0.1:9")), |_| {}).await;
    let body: Value = app.client().get("/health").await.json();
    assert_eq!(body["remote_backend"], true);
}
