use ai::{AiError, ChatClient, ChatMessage};
use api::{auth::generate_jwt, routes::routes, state::AppState};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use ctor::ctor;
use db::models::{Account, Role, admin, student, teacher};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Arc;
use tempfile::{TempDir, tempdir};
use util::{config::AppConfig, paths::Storage};

pub const TEST_SECRET: &str = "lumino-test-secret";

#[ctor]
fn setup_tests() {
    unsafe {
        std::env::set_var("JWT_SECRET", TEST_SECRET);
        std::env::set_var("LOG_TO_STDOUT", "false");
    }
    AppConfig::set_jwt_secret(TEST_SECRET);
}

/// Chat client that answers every conversation with the same text, or
/// fails when built with `None`.
pub struct StubLlm(pub Option<String>);

#[async_trait]
impl ChatClient for StubLlm {
    async fn complete(&self, _messages: Vec<ChatMessage>) -> Result<String, AiError> {
        match &self.0 {
            Some(reply) => Ok(reply.clone()),
            None => Err(AiError::EmptyResponse),
        }
    }
}

/// Router over a fresh in-memory database with media stored in a temp dir.
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn make_test_app_with_reply(reply: Option<&str>) -> (Router, AppState, TempDir) {
    let db = setup_test_db().await;
    let media = tempdir().expect("temp media dir");
    let storage = Storage::new(media.path());
    storage.ensure_layout().expect("media layout");

    let app_state = AppState::new(db, Arc::new(StubLlm(reply.map(str::to_string))), storage);
    let router = Router::new().nest("/api", routes(app_state.clone()));
    (router, app_state, media)
}

pub async fn make_test_app() -> (Router, AppState, TempDir) {
    make_test_app_with_reply(Some("")).await
}

pub async fn bearer(db: &DatabaseConnection, role: Role, account_id: &str) -> String {
    let account = Account::find(db, role, account_id)
        .await
        .unwrap()
        .expect("seeded account");
    let (token, _) = generate_jwt(&account).unwrap();
    format!("Bearer {token}")
}

pub async fn seed_admin(db: &DatabaseConnection) -> String {
    admin::Model::create(db, "A0001", "Root", "admin123", None)
        .await
        .unwrap();
    bearer(db, Role::Admin, "A0001").await
}

pub async fn seed_teacher(db: &DatabaseConnection, staff_id: &str) -> (teacher::Model, String) {
    let t = teacher::Model::create(db, staff_id, &format!("Teacher {staff_id}"), "teach123", "Maths")
        .await
        .unwrap();
    let token = bearer(db, Role::Teacher, staff_id).await;
    (t, token)
}

pub async fn seed_student(db: &DatabaseConnection, student_id: &str) -> (student::Model, String) {
    let s = student::Model::create(
        db,
        student::NewStudent {
            student_id: student_id.to_string(),
            username: format!("Student {student_id}"),
            password: "study123".to_string(),
            college: "Engineering".to_string(),
            grade: Some("Year 1".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let token = bearer(db, Role::Student, student_id).await;
    (s, token)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Single-file multipart body with an optional extra text field.
pub fn multipart_request(
    uri: &str,
    token: &str,
    file_name: &str,
    content: &[u8],
    extra: Option<(&str, &str)>,
) -> Request<Body> {
    let boundary = "----lumino-test-boundary";
    let mut body = Vec::new();
    if let Some((name, value)) = extra {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, token)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
