//! Common test utilities and fixtures
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use capsule_identity::{IdentityError, IdentityProvider, Profile};
use capsule_server::{create_router, services::SessionService, state::AppState};
use capsule_storage::Database;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Create a test database with migrations applied
///
/// Backed by a temp file so every pooled connection shares one database.
pub async fn create_test_database() -> Result<(Arc<Database>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let db = Database::new(&url).await?;
    Ok((Arc::new(db), temp_dir))
}

/// Identity provider that answers from a fixed code -> profile table
#[derive(Default)]
pub struct FakeIdentity {
    profiles: HashMap<String, Profile>,
}

impl FakeIdentity {
    pub fn with(mut self, code: &str, profile: Profile) -> Self {
        self.profiles.insert(code.to_string(), profile);
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn authenticate(&self, code: &str) -> capsule_identity::Result<Profile> {
        self.profiles
            .get(code)
            .cloned()
            .ok_or_else(|| IdentityError::Upstream("bad_verification_code".to_string()))
    }
}

pub mod fixtures {
    use capsule_identity::Profile;

    pub const OCTO_CODE: &str = "abc";
    pub const HUBOT_CODE: &str = "def";

    pub fn octo() -> Profile {
        Profile {
            id: 42,
            login: "octo".to_string(),
            name: "Octo Cat".to_string(),
            avatar_url: "https://x/a.png".to_string(),
        }
    }

    pub fn hubot() -> Profile {
        Profile {
            id: 7,
            login: "hubot".to_string(),
            name: "Hubot".to_string(),
            avatar_url: "https://x/h.png".to_string(),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub sessions: Arc<SessionService>,
    _temp_dir: TempDir,
}

/// App with a fake provider that knows `OCTO_CODE` and `HUBOT_CODE`
pub async fn create_test_app() -> TestApp {
    let identity = FakeIdentity::default()
        .with(fixtures::OCTO_CODE, fixtures::octo())
        .with(fixtures::HUBOT_CODE, fixtures::hubot());
    create_test_app_with(Arc::new(identity)).await
}

pub async fn create_test_app_with(identity: Arc<dyn IdentityProvider>) -> TestApp {
    let (db, temp_dir) = create_test_database().await.unwrap();
    let sessions = Arc::new(SessionService::new(TEST_SECRET, 30));

    let app_state = AppState::new(db.clone(), Arc::clone(&sessions), identity);
    let router = create_router(app_state, &[]).unwrap();

    TestApp {
        router,
        db,
        sessions,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    /// Send a request and return status plus parsed JSON body (`Null` when empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Log in through `/register` and return the session token
    pub async fn login(&self, code: &str) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/register",
                None,
                serde_json::json!({ "code": code }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}
