#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use edugenie_api::{backend::InMemoryBackend, config::Config, create_router, services::AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Demo-mode configuration with a fast quiz ticker.
pub fn test_config() -> Config {
    Config {
        quiz_tick_interval_ms: 20,
        ..Config::default()
    }
}

pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(test_config())
}

pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let backend = Arc::new(InMemoryBackend::seeded());
    let state = Arc::new(
        AppState::with_backend(config, backend).expect("Failed to initialize test app state"),
    );
    (create_router(state.clone()), state)
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, String, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap(), content_type)
}

/// JSON request; the body is `Value::Null` when the response is not JSON.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, text, _) = send_raw(app, method, uri, token, body).await;
    let json = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, json)
}

pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn signup(app: &Router, email: &str, name: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": "secret123",
            "name": name,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}
