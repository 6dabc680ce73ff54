use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::{
    extractors::ValidatedJson,
    handlers::backend_error_response,
    middlewares::auth::JwtClaims,
    models::user::{LoginRequest, SignupRequest},
    services::{auth_service::AuthGateError, AppState},
};

fn gate_error(err: AuthGateError) -> (StatusCode, String) {
    match err {
        AuthGateError::Backend(e) => backend_error_response(&e),
        AuthGateError::Token(e) => {
            tracing::error!("Failed to issue token: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        AuthGateError::UnknownSession => (StatusCode::UNAUTHORIZED, err.to_string()),
    }
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Login attempt for user: {}", req.email);

    let response = state.auth.login(&req).await.map_err(|e| {
        tracing::warn!("Login failed for {}: {}", req.email, e);
        gate_error(e)
    })?;

    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Signing up new user: {} ({})", req.email, req.role.as_str());

    let response = state.auth.signup(&req).await.map_err(|e| {
        tracing::warn!("Signup failed for {}: {}", req.email, e);
        gate_error(e)
    })?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.auth.logout(&claims).await.map_err(gate_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let current = state.auth.current(&claims).await.map_err(gate_error)?;
    Ok(Json(current))
}
