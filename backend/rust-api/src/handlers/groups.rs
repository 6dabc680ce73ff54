use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    extractors::ValidatedJson,
    handlers::backend_error_response,
    middlewares::auth::JwtClaims,
    models::group::{AddMemberRequest, CreateGroupRequest},
    services::{
        group_service::{GroupError, GroupService},
        AppState,
    },
};

fn group_error(err: GroupError) -> (StatusCode, String) {
    match err {
        GroupError::NotFound | GroupError::StudentNotFound => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        GroupError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
        GroupError::Backend(e) => backend_error_response(&e),
    }
}

/// GET /api/v1/groups
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = GroupService::new(state.backend.clone());
    let groups = service.list(&claims).await.map_err(group_error)?;
    Ok(Json(groups))
}

/// POST /api/v1/groups
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(req): ValidatedJson<CreateGroupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = GroupService::new(state.backend.clone());
    let group = service.create(&claims, &req).await.map_err(group_error)?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /api/v1/groups/{id}
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = GroupService::new(state.backend.clone());
    let group = service.get(&claims, &group_id).await.map_err(group_error)?;
    Ok(Json(group))
}

/// POST /api/v1/groups/{id}/members
pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(group_id): Path<String>,
    ValidatedJson(req): ValidatedJson<AddMemberRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Adding {} to group {}", req.email, group_id);
    let service = GroupService::new(state.backend.clone());
    let group = service
        .add_member(&claims, &group_id, &req)
        .await
        .map_err(group_error)?;
    Ok((StatusCode::CREATED, Json(group)))
}
