use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use std::sync::Arc;

use crate::{
    extractors::{ValidatedJson, ValidatedQuery},
    middlewares::auth::JwtClaims,
    models::lesson::{DoubtRequest, LessonPlanRequest, VideoQuery},
    services::{lesson_service::LessonService, AppState},
};

/// POST /api/v1/lessons
pub async fn generate_lesson_plan(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(req): ValidatedJson<LessonPlanRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = LessonService::new(&state);

    match service.generate(&claims.sub, &req).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(e) => {
            tracing::error!("Failed to generate lesson plan: {:#}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// POST /api/v1/doubts
pub async fn resolve_doubt(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(req): ValidatedJson<DoubtRequest>,
) -> impl IntoResponse {
    tracing::info!("Resolving doubt for user {}", claims.sub);
    Json(state.generator.resolve_doubt(req.question.trim()).await)
}

/// GET /api/v1/videos?topic=&grade=
pub async fn search_videos(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<VideoQuery>,
) -> impl IntoResponse {
    Json(state.videos.search(&query.topic, &query.grade).await)
}
