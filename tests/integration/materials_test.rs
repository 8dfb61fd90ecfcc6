//! Folder tree, upload and delete endpoints.

use axum::http::StatusCode;
use serde_json::json;

use coursehub_core::traits::BlobStore;

use crate::helpers::*;

#[tokio::test]
async fn test_open_root_creates_it_once() {
    let app = TestApp::new().await;
    let first = app.root_folder_id().await;
    let second = app.root_folder_id().await;
    assert_eq!(first, second);

    let token = app.student_token(STUDENT);
    let response = app
        .request("GET", &format!("/api/courses/{COURSE}/materials"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["folder"]["id"], first);
    assert_eq!(response.body["data"]["path"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_outsider_cannot_open_materials() {
    let app = TestApp::new().await;
    let token = app.student_token(OUTSIDER);
    let response = app
        .request("GET", &format!("/api/courses/{COURSE}/materials"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["code"], "PERMISSION_DENIED");
    assert_eq!(response.body["status"], 403);
}

#[tokio::test]
async fn test_unknown_course_is_not_found() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);
    let response = app
        .request("GET", "/api/courses/999/materials", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_week1_upload_and_overwrite_scenario() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);
    let root = app.root_folder_id().await;

    let created = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/folders"),
            Some(json!({ "name": "Week1" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["parent_id"], root);
    let week1 = created.body["data"]["id"].as_i64().unwrap();

    let first = app.upload_material(week1, "notes.pdf", &[1u8; 10]).await;
    assert_eq!(first.status, StatusCode::CREATED, "{:?}", first.body);
    let path = first.body["data"]["storage_path"].as_str().unwrap().to_string();
    assert_eq!(path, format!("courses/{COURSE}/folders/{week1}/notes.pdf"));

    let second = app.upload_material(week1, "notes.pdf", &[2u8; 20]).await;
    assert_eq!(second.status, StatusCode::CREATED, "{:?}", second.body);
    assert_eq!(second.body["data"]["storage_path"], path.as_str());

    let contents = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials/folders/{week1}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(contents.status, StatusCode::OK);
    let files = contents.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], "notes.pdf");

    let breadcrumb: Vec<&str> = contents.body["data"]["path"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(breadcrumb, vec!["Root", "Week1"]);

    assert_eq!(app.db.file_count().await, 1);
    assert_eq!(app.blobs.read_bytes(&path).await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_non_owner_cannot_create_folder() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OTHER_TEACHER);
    let response = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/folders"),
            Some(json!({ "name": "Week1" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_folder_requires_name() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);
    for body in [json!({}), json!({ "name": "" }), json!({ "name": "   " })] {
        let response = app
            .request(
                "POST",
                &format!("/api/courses/{COURSE}/materials/folders"),
                Some(body),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
        assert_eq!(response.body["code"], "VALIDATION");
    }
}

#[tokio::test]
async fn test_folder_from_another_course_is_not_found() {
    let app = TestApp::new().await;
    let other = app.db.insert_course("Compilers", OWNER).await;
    let token = app.teacher_token(OWNER);

    let foreign = app
        .request(
            "GET",
            &format!("/api/courses/{}/materials", other.id),
            None,
            Some(&token),
        )
        .await;
    let foreign_root = foreign.body["data"]["folder"]["id"].as_i64().unwrap();

    let response = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials/folders/{foreign_root}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_cannot_upload_material() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let token = app.student_token(STUDENT);
    let folder_id = root.to_string();

    let response = app
        .upload(
            &format!("/api/courses/{COURSE}/materials/files"),
            &[("folder_id", folder_id.as_str())],
            "notes.pdf",
            b"hello",
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_upload_requires_folder_id() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);
    let response = app
        .upload(
            &format!("/api/courses/{COURSE}/materials/files"),
            &[],
            "notes.pdf",
            b"hello",
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_storage_failure_surfaces_message() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    app.blobs.set_fail_puts(true);

    let response = app.upload_material(root, "notes.pdf", b"hello").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["code"], "UPSTREAM_STORAGE");
    assert_ne!(response.body["error"], "Internal server error");
    assert_eq!(app.db.file_count().await, 0);
}

#[tokio::test]
async fn test_delete_removes_blob_and_record() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "slides.pdf", b"slides").await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();

    let token = app.teacher_token(OWNER);
    let response = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/files/delete"),
            Some(json!({ "file_id": file_id, "file_path": path })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["file_id"], file_id);
    assert_eq!(app.db.file_count().await, 0);
    assert!(!app.blobs.exists(&path).await.unwrap());
}

#[tokio::test]
async fn test_delete_with_mismatched_path_is_rejected() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "slides.pdf", b"slides").await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();

    let token = app.teacher_token(OWNER);
    let response = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/files/delete"),
            Some(json!({ "fileId": file_id, "filePath": "courses/7/folders/1/other.pdf" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.file_count().await, 1);
}

#[tokio::test]
async fn test_delete_without_file_path_is_rejected() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "slides.pdf", b"slides").await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();

    let token = app.teacher_token(OWNER);
    let response = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/files/delete"),
            Some(json!({ "fileId": file_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");
    assert_eq!(app.db.file_count().await, 1);
    assert_eq!(app.blobs.len(), 1);
}

#[tokio::test]
async fn test_delete_keeps_record_when_storage_refuses() {
    let app = TestApp::new().await;
    let root = app.root_folder_id().await;
    let uploaded = app.upload_material(root, "slides.pdf", b"slides").await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();
    let path = uploaded.body["data"]["storage_path"].as_str().unwrap().to_string();
    app.blobs.set_fail_deletes(true);

    let token = app.teacher_token(OWNER);
    let response = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/files/delete"),
            Some(json!({ "file_id": file_id, "file_path": path })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.db.file_count().await, 1);
}

#[tokio::test]
async fn test_listing_endpoints_and_tree() {
    let app = TestApp::new().await;
    let token = app.teacher_token(OWNER);
    let root = app.root_folder_id().await;

    let week1 = app
        .request(
            "POST",
            &format!("/api/courses/{COURSE}/materials/folders"),
            Some(json!({ "name": "Week1", "parent_id": root })),
            Some(&token),
        )
        .await;
    let week1_id = week1.body["data"]["id"].as_i64().unwrap();
    let uploaded = app.upload_material(week1_id, "notes.pdf", b"notes").await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();

    let student = app.student_token(STUDENT);
    let children = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials/folders/{root}/children"),
            None,
            Some(&student),
        )
        .await;
    assert_eq!(children.status, StatusCode::OK);
    assert_eq!(children.body["data"][0]["name"], "Week1");

    let files = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials/folders/{week1_id}/files"),
            None,
            Some(&student),
        )
        .await;
    assert_eq!(files.body["data"][0]["id"], file_id);

    let file = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials/files/{file_id}"),
            None,
            Some(&student),
        )
        .await;
    assert_eq!(file.status, StatusCode::OK);
    assert_eq!(file.body["data"]["filename"], "notes.pdf");

    let tree = app
        .request(
            "GET",
            &format!("/api/courses/{COURSE}/materials/tree"),
            None,
            Some(&student),
        )
        .await;
    assert_eq!(tree.status, StatusCode::OK);
    assert_eq!(tree.body["data"]["folder"]["id"], root);
    assert_eq!(tree.body["data"]["children"][0]["folder"]["name"], "Week1");
    assert_eq!(
        tree.body["data"]["children"][0]["files"][0]["filename"],
        "notes.pdf"
    );
}
