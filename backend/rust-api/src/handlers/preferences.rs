use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::{
    extractors::ValidatedJson,
    handlers::catalog::svg_response,
    middlewares::auth::JwtClaims,
    models::preferences::UpdatePreferencesRequest,
    services::{preference_service::PreferenceError, AppState},
};

fn preference_error(err: PreferenceError) -> (StatusCode, String) {
    match err {
        PreferenceError::UnknownTheme(_) | PreferenceError::UnknownAvatar(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        PreferenceError::Store(_) => {
            tracing::error!("{}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// GET /api/v1/preferences
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let appearance = state
        .preferences
        .get(&claims.sub)
        .await
        .map_err(preference_error)?;
    Ok(Json(appearance))
}

/// PUT /api/v1/preferences
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(req): ValidatedJson<UpdatePreferencesRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let appearance = state
        .preferences
        .update(&claims.sub, &req)
        .await
        .map_err(preference_error)?;
    Ok(Json(appearance))
}

/// GET /api/v1/preferences/avatar.svg
pub async fn current_avatar(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let avatar = state
        .preferences
        .current_avatar(&claims.sub)
        .await
        .map_err(preference_error)?;
    Ok(svg_response(avatar))
}
