//! Signed URL issuance and the signed blob route.

use axum::http::{StatusCode, header};
use serde_json::json;

use crate::helpers::*;

fn signed_url_uri(path: &str) -> String {
    format!("/api/files/signed-url?filePath={path}")
}

#[tokio::test]
async fn test_signed_url_redirects_to_fetchable_blob() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "notes.pdf", b"lecture notes").await;
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();

    let token = app.student_token(STUDENT);
    let redirect = app
        .request("GET", &signed_url_uri(&path), None, Some(&token))
        .await;
    assert_eq!(redirect.status, StatusCode::TEMPORARY_REDIRECT);

    let blob = app.send_raw(get(&redirect.location_path())).await;
    assert_eq!(blob.status, StatusCode::OK);
    assert_eq!(&blob.body[..], b"lecture notes");
    assert_eq!(
        blob.headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok()),
        Some("13")
    );
}

#[tokio::test]
async fn test_signed_links_and_bearer_tokens_stay_out_of_logs() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "notes.pdf", b"lecture notes").await;
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();

    let bearer = app.student_token(STUDENT);
    let redirect = app
        .request("GET", &signed_url_uri(&path), None, Some(&bearer))
        .await;
    let location = redirect.location_path();
    let blob = app.send_raw(get(&location)).await;
    assert_eq!(blob.status, StatusCode::OK);

    let signature = location
        .split("token=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .unwrap()
        .to_string();
    assert!(!signature.is_empty());

    let output = logs.contents();
    assert!(output.contains("/api/blobs/"), "request was not logged: {output}");
    assert!(!output.contains(&signature));
    assert!(!output.contains("token="));
    assert!(!output.contains(&bearer));
}

#[tokio::test]
async fn test_tampered_signature_is_rejected() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "notes.pdf", b"lecture notes").await;
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();

    let token = app.teacher_token(OWNER);
    let redirect = app
        .request("GET", &signed_url_uri(&path), None, Some(&token))
        .await;
    let location = redirect.location_path();
    let tampered = location.replace("notes.pdf", "other.pdf");

    let blob = app.send_raw(get(&tampered)).await;
    assert_eq!(blob.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_signed_url_after_delete_is_not_found() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "notes.pdf", b"lecture notes").await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();

    let teacher = app.teacher_token(OWNER);
    let deleted = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/files/delete"),
            Some(json!({ "file_id": file_id, "file_path": path })),
            Some(&teacher),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app
        .request("GET", &signed_url_uri(&path), None, Some(&teacher))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_outsider_cannot_sign_course_paths() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "notes.pdf", b"lecture notes").await;
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();

    let token = app.student_token(OUTSIDER);
    let response = app
        .request("GET", &signed_url_uri(&path), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_students_only_sign_their_own_submissions() {
    let app = TestApp::new().await;
    let token = app.student_token(STUDENT);
    let submitted = app
        .upload(
            &format!(
                "/api/courses/{COURSE}/assignments/{}/submit",
                app.assignment.id
            ),
            &[],
            "hw1.pdf",
            b"answer",
            &token,
        )
        .await;
    let path = submitted.body["data"]["file_path"].as_str().unwrap().to_string();

    let own = app
        .request("GET", &signed_url_uri(&path), None, Some(&token))
        .await;
    assert_eq!(own.status, StatusCode::TEMPORARY_REDIRECT);

    let classmate = app.student_token(OTHER_STUDENT);
    let other = app
        .request("GET", &signed_url_uri(&path), None, Some(&classmate))
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let teacher = app.teacher_token(OWNER);
    let graded = app
        .request("GET", &signed_url_uri(&path), None, Some(&teacher))
        .await;
    assert_eq!(graded.status, StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_signed_url_validates_path() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);

    let missing = app
        .request("GET", "/api/files/signed-url", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let garbage = app
        .request("GET", &signed_url_uri("etc/passwd"), None, Some(&token))
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
}
