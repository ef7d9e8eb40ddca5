//! Integration tests for the backend client
//!
//! These tests run the client against an in-process HTTP backend and check
//! header handling and the mapping of responses onto error categories.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use common::{BackendClient, BackendConfig, ErrorCategory, GalleryError};
use reqwest::Method;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_backend() -> String {
    let app = Router::new()
        .route(
            "/echo",
            get(|headers: HeaderMap| async move {
                let apikey = headers
                    .get("apikey")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let authorization = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "apikey": apikey, "authorization": authorization }))
            }),
        )
        .route(
            "/rejected",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error_description": "Invalid login credentials" })),
                )
            }),
        )
        .route(
            "/html-error",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
        )
        .route("/garbage", get(|| async { "definitely not json" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_apikey_sent_on_every_request() -> Result<(), Box<dyn std::error::Error>> {
    let url = spawn_backend().await;
    let client = BackendClient::new(BackendConfig::new(url, "anon-key"));

    let request = client
        .request(Method::GET, "/echo")
        .bearer_auth(client.bearer_or_anon(None));
    let body: Value = client.send_json(request, "unused").await?;

    assert_eq!(body["apikey"], "anon-key");
    assert_eq!(body["authorization"], "Bearer anon-key");
    Ok(())
}

#[tokio::test]
async fn test_rejection_carries_backend_message() {
    let url = spawn_backend().await;
    let client = BackendClient::new(BackendConfig::new(url, "anon-key"));

    let result: Result<Value, _> = client
        .send_json(client.request(Method::GET, "/rejected"), "Login failed")
        .await;

    match result {
        Err(GalleryError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid login credentials");
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_rejection_without_json_uses_fallback() {
    let url = spawn_backend().await;
    let client = BackendClient::new(BackendConfig::new(url, "anon-key"));

    let err = client
        .send_empty(client.request(Method::GET, "/html-error"), "Upload failed")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Upload failed");
    assert_eq!(err.category(), ErrorCategory::Backend);
}

#[tokio::test]
async fn test_malformed_success_body() {
    let url = spawn_backend().await;
    let client = BackendClient::new(BackendConfig::new(url, "anon-key"));

    let err = client
        .send_json::<Value>(client.request(Method::GET, "/garbage"), "unused")
        .await
        .unwrap_err();

    assert!(matches!(err, GalleryError::MalformedResponse(_)));
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Grab a free port, then close it so nothing listens there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BackendClient::new(BackendConfig::new(format!("http://{}", addr), "anon-key"));
    let err = client
        .send_empty(client.request(Method::GET, "/echo"), "unused")
        .await
        .unwrap_err();

    assert!(matches!(err, GalleryError::Transport(_)));
}
