//! Probe and documentation route tests.
//!
//! Run with: `cargo test -p ffstudio-api --test health_test`

#![cfg(unix)]

mod helpers;

use helpers::{setup_test_app, setup_test_app_with, Encoder};
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_with_working_encoder() {
    let app = setup_test_app();

    let response = app.client().get("/ready").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["ffmpeg"], "ready");
    assert_eq!(body["work_dir"], "ready");
    // The write probe is removed again
    assert!(app.work_dir_files().is_empty());
}

#[tokio::test]
async fn test_readiness_without_encoder() {
    let app = setup_test_app_with(Encoder::Missing, |_| {});

    let response = app.client().get("/ready").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "not_ready");
    assert!(body["ffmpeg"].as_str().unwrap().starts_with("not_ready"));
    assert_eq!(body["work_dir"], "ready");
}

#[tokio::test]
async fn test_openapi_document_lists_operations() {
    let app = setup_test_app();

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    for path in [
        "/api/cut-audio",
        "/api/crop-video",
        "/api/trim-video",
        "/api/replace-audio",
        "/api/image-to-video",
    ] {
        assert!(body["paths"].get(path).is_some(), "missing {}", path);
    }
}

#[tokio::test]
async fn test_static_front_end_is_served() {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<h1>ffstudio</h1>").unwrap();
    let static_path = static_dir.path().to_path_buf();

    let app = setup_test_app_with(Encoder::Copying, move |config| {
        config.static_dir = static_path;
    });

    let response = app.client().get("/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("ffstudio"));

    // Unknown paths fall back to the index page
    let response = app.client().get("/some/client/route").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("ffstudio"));

    // API routes still win
    let response = app.client().get("/health").await;
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}
