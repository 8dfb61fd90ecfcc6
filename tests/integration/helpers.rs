//! Shared test helpers for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use coursehub_api::{AppState, build_app};
use coursehub_auth::JwtEncoder;
use coursehub_core::config::{AppConfig, DatabaseBackend};
use coursehub_core::traits::BlobStore;
use coursehub_database::{MemoryDatabase, Repositories};
use coursehub_entity::assignment::Assignment;
use coursehub_entity::user::UserRole;
use coursehub_storage::build_signer;
use coursehub_storage::providers::MemoryBlobStore;

pub const COURSE: i64 = 7;
pub const OWNER: i64 = 100;
pub const OTHER_TEACHER: i64 = 101;
pub const STUDENT: i64 = 200;
pub const OTHER_STUDENT: i64 = 201;
pub const OUTSIDER: i64 = 300;

const BOUNDARY: &str = "coursehub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Relational store behind the router
    pub db: Arc<MemoryDatabase>,
    /// Blob store behind the router
    pub blobs: MemoryBlobStore,
    /// Assignment of course 7 requiring `hw1.pdf`
    pub assignment: Assignment,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application with course 7, its teacher, two
    /// enrolled students and one assignment.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.storage.provider = "memory".to_string();
        config.storage.serialize_path_writes = true;
        config.auth.jwt_secret = "integration-secret".to_string();
        config.storage.signing_secret = "integration-signing".to_string();
        config.validate().expect("test config must be valid");

        let db = Arc::new(MemoryDatabase::new());
        db.insert_course_with_id(COURSE, "Databases", OWNER).await;
        db.enroll(STUDENT, COURSE).await;
        db.enroll(OTHER_STUDENT, COURSE).await;
        let assignment = db.insert_assignment(COURSE, "Homework 1", "hw1.pdf").await;

        let blobs = MemoryBlobStore::new(build_signer(&config.storage, &config.server));
        let storage: Arc<dyn BlobStore> = Arc::new(blobs.clone());

        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config, Repositories::memory(db.clone()), storage, None);

        Self {
            router: build_app(state),
            db,
            blobs,
            assignment,
            encoder,
        }
    }

    /// Bearer token for a teacher
    pub fn teacher_token(&self, user_id: i64) -> String {
        self.token(user_id, UserRole::Teacher)
    }

    /// Bearer token for a student
    pub fn student_token(&self, user_id: i64) -> String {
        self.token(user_id, UserRole::Student)
    }

    fn token(&self, user_id: i64, role: UserRole) -> String {
        self.encoder
            .issue(user_id, role, "Test User")
            .expect("Failed to issue token")
            .0
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Make a multipart request with text fields and one `file` part
    pub async fn upload(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        filename: &str,
        data: &[u8],
        token: &str,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a material file into `folder_id` of course 7 as its teacher
    pub async fn upload_material(&self, folder_id: i64, filename: &str, data: &[u8]) -> TestResponse {
        let token = self.teacher_token(OWNER);
        let folder_id = folder_id.to_string();
        self.upload(
            &format!("/api/courses/{COURSE}/materials/files"),
            &[("folder_id", folder_id.as_str())],
            filename,
            data,
            &token,
        )
        .await
    }

    /// Root folder ID of course 7, opened as its teacher
    pub async fn root_folder_id(&self) -> i64 {
        let token = self.teacher_token(OWNER);
        let response = self
            .request("GET", &format!("/api/courses/{COURSE}/materials"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["folder"]["id"]
            .as_i64()
            .expect("root folder id")
    }

    /// Send a request and keep the raw body
    pub async fn send_raw(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let raw = self.send_raw(req).await;
        let body: Value = serde_json::from_slice(&raw.body).unwrap_or(Value::Null);
        TestResponse {
            status: raw.status,
            headers: raw.headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header of a redirect, reduced to path and query
    pub fn location_path(&self) -> String {
        let location = self
            .headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("redirect without Location");
        match location.find("/api/") {
            Some(idx) => location[idx..].to_string(),
            None => location.to_string(),
        }
    }
}

/// Response with an unparsed body
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body bytes
    pub body: Bytes,
}

/// Plain GET without credentials
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Formatted log output captured on the current thread.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Send every event and span, down to TRACE, into the buffer until the
    /// guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
