use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    middlewares::auth::JwtClaims,
    models::dashboard::DashboardResponse,
    services::{dashboard_service::DashboardService, AppState},
};

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Json<DashboardResponse> {
    let service = DashboardService::new(state.backend.clone());
    Json(service.overview(&claims).await)
}
