//! Assignment submission endpoints.

use axum::http::StatusCode;

use crate::helpers::*;

fn submit_uri(app: &TestApp) -> String {
    format!(
        "/api/courses/{COURSE}/assignments/{}/submit",
        app.assignment.id
    )
}

#[tokio::test]
async fn test_submitting_twice_keeps_one_submission() {
    let app = TestApp::new().await;
    let token = app.student_token(STUDENT);

    let first = app
        .upload(&submit_uri(&app), &[], "hw1.pdf", b"draft", &token)
        .await;
    assert_eq!(first.status, StatusCode::CREATED, "{:?}", first.body);
    let second = app
        .upload(&submit_uri(&app), &[], "hw1.pdf", b"final answer", &token)
        .await;
    assert_eq!(second.status, StatusCode::CREATED, "{:?}", second.body);
    assert_eq!(first.body["data"]["file_path"], second.body["data"]["file_path"]);

    let teacher = app.teacher_token(OWNER);
    let listed = app
        .request(
            "GET",
            &format!(
                "/api/courses/{COURSE}/assignments/{}/submissions",
                app.assignment.id
            ),
            None,
            Some(&teacher),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(app.blobs.len(), 1);
}

#[tokio::test]
async fn test_filename_must_match_exactly() {
    let app = TestApp::new().await;
    let token = app.student_token(STUDENT);

    let response = app
        .upload(&submit_uri(&app), &[], "HW1.PDF", b"answer", &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "FILENAME_MISMATCH");
    assert_eq!(response.body["error"], "Please upload the file as \"hw1.pdf\".");
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_teacher_cannot_submit() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);
    let response = app
        .upload(&submit_uri(&app), &[], "hw1.pdf", b"answer", &token)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unenrolled_student_cannot_submit() {
    let app = TestApp::new().await;
    let token = app.student_token(OUTSIDER);
    let response = app
        .upload(&submit_uri(&app), &[], "hw1.pdf", b"answer", &token)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_assignment_is_not_found() {
    let app = TestApp::new().await;
    let token = app.student_token(STUDENT);
    let response = app
        .upload(
            &format!("/api/courses/{COURSE}/assignments/9999/submit"),
            &[],
            "hw1.pdf",
            b"answer",
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_own_submission_lookup() {
    let app = TestApp::new().await;
    let uri = format!(
        "/api/courses/{COURSE}/assignments/{}/submission",
        app.assignment.id
    );
    let token = app.student_token(STUDENT);

    let before = app.request("GET", &uri, None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::NOT_FOUND);

    app.upload(&submit_uri(&app), &[], "hw1.pdf", b"answer", &token)
        .await;
    let after = app.request("GET", &uri, None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::OK);
    assert_eq!(after.body["data"]["user_id"], STUDENT);
}

#[tokio::test]
async fn test_students_cannot_list_submissions() {
    let app = TestApp::new().await;
    let token = app.student_token(STUDENT);
    let response = app
        .request(
            "GET",
            &format!(
                "/api/courses/{COURSE}/assignments/{}/submissions",
                app.assignment.id
            ),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
