use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use std::sync::Arc;

use crate::backend::BackendError;
use crate::metrics;
use crate::services::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut backend_health = serde_json::Map::new();
    let mode = state.backend.mode().as_str();
    backend_health.insert("mode".to_string(), json!(mode));

    let healthy = match tokio::time::timeout(
        std::time::Duration::from_secs(1),
        state.backend.ping(),
    )
    .await
    {
        Ok(Ok(())) => {
            backend_health.insert("status".to_string(), json!("healthy"));
            true
        }
        Ok(Err(e)) => {
            backend_health.insert("status".to_string(), json!("unhealthy"));
            backend_health.insert("error".to_string(), json!(format!("Backend error: {}", e)));
            false
        }
        Err(_) => {
            backend_health.insert("status".to_string(), json!("unhealthy"));
            backend_health.insert("error".to_string(), json!("Backend timeout after 1s"));
            false
        }
    };

    let (status_code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let content = if state.generator.is_demo() {
        "demo"
    } else {
        "live"
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "service": "edugenie-api",
            "version": env!("CARGO_PKG_VERSION"),
            "mode": mode,
            "content": content,
            "dependencies": { "backend": backend_health }
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// HTTP Basic auth for `/metrics` against `metrics_auth` (`user:password`).
pub async fn metrics_auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let credentials = String::from_utf8(decoded).map_err(|_| StatusCode::UNAUTHORIZED)?;

    if credentials != state.config.metrics_auth {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

/// Status for a hosted backend failure surfaced to the client.
pub(crate) fn backend_error_response(err: &BackendError) -> (StatusCode, String) {
    let status = match err {
        BackendError::Auth(_) => StatusCode::UNAUTHORIZED,
        BackendError::Conflict(_) => StatusCode::CONFLICT,
        BackendError::NotFound { .. } => StatusCode::NOT_FOUND,
        BackendError::Http(_) | BackendError::Status { .. } | BackendError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    if status == StatusCode::BAD_GATEWAY {
        tracing::error!("Hosted backend failure: {}", err);
    }
    (status, err.to_string())
}

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod groups;
pub mod lessons;
pub mod preferences;
pub mod quizzes;
pub mod sse;
