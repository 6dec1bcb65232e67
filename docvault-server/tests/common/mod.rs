//! Router-level test harness: in-memory database, requests via `oneshot`
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use docvault_server::{AppState, Config, create_router};
use http::{HeaderMap, Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@cafe.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: http::header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        ..Config::default()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let state = AppState::new(&config).await.unwrap();
        let router = create_router(state.clone());
        Self { router, state }
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.send(Method::POST, path, None, Some(body)).await
    }

    /// Log in and return `(token, user json)`
    pub async fn login(&self, email: &str, password: &str) -> (String, Value) {
        let resp = self
            .post("/api/auth/login", json!({ "email": email, "password": password }))
            .await;
        assert_eq!(resp.status, StatusCode::OK, "login failed: {:?}", resp.json());
        let body = resp.json();
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"].clone(),
        )
    }

    /// Add an employee through the API and return its json
    pub async fn add_employee(&self, email: &str, name: &str, password: &str) -> Value {
        let resp = self
            .post(
                "/api/employees",
                json!({ "email": email, "name": name, "password": password }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "add employee failed: {:?}", resp.json());
        resp.json()["employee"].clone()
    }
}

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
