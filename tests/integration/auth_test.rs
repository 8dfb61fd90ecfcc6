//! Bearer token handling and the public health endpoint.

use axum::http::StatusCode;

use crate::helpers::*;

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", &format!("/api/courses/{COURSE}/materials"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials"),
            None,
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signed_url_requires_token() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "GET",
            "/api/files/signed-url?filePath=courses/7/folders/1/a.pdf",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "memory");
    assert_eq!(response.body["data"]["storage_provider"], "memory");
}
