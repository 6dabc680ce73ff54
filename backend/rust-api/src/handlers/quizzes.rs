use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    extractors::ValidatedJson,
    middlewares::auth::JwtClaims,
    models::quiz::{CreateQuizRequest, SelectAnswerRequest},
    quiz::QuizError,
    services::{lesson_service::LessonService, quiz_service::QuizServiceError, AppState},
};

pub(crate) fn quiz_error(err: QuizServiceError) -> (StatusCode, String) {
    let status = match &err {
        QuizServiceError::NotFound => StatusCode::NOT_FOUND,
        QuizServiceError::Quiz(
            QuizError::EmptyQuiz
            | QuizError::QuestionOutOfRange { .. }
            | QuizError::InvalidOption { .. },
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        QuizServiceError::Quiz(_) => StatusCode::CONFLICT,
    };
    (status, err.to_string())
}

/// POST /api/v1/quizzes
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(req): ValidatedJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!(
        "Creating quiz for user_id={}, topic={}, grade={}",
        claims.sub,
        req.topic,
        req.grade
    );

    let response = LessonService::new(&state)
        .generate_quiz(&claims.sub, &req)
        .await
        .map_err(quiz_error)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/quizzes/{id}
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let view = state.quizzes.view(&claims.sub, &id).await.map_err(quiz_error)?;
    Ok(Json(view))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn discard_quiz(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .quizzes
        .discard(&claims.sub, &id)
        .await
        .map_err(quiz_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/quizzes/{id}/answers
pub async fn select_answer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SelectAnswerRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let view = state
        .quizzes
        .select_answer(&claims.sub, &id, req.question_index, &req.option)
        .await
        .map_err(quiz_error)?;
    Ok(Json(view))
}

/// POST /api/v1/quizzes/{id}/advance
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let view = state
        .quizzes
        .advance(&claims.sub, &id)
        .await
        .map_err(quiz_error)?;
    Ok(Json(view))
}

/// POST /api/v1/quizzes/{id}/retreat
pub async fn retreat(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let view = state
        .quizzes
        .retreat(&claims.sub, &id)
        .await
        .map_err(quiz_error)?;
    Ok(Json(view))
}

/// POST /api/v1/quizzes/{id}/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Submitting quiz {} for user {}", id, claims.sub);
    let view = state
        .quizzes
        .submit(&claims.sub, &id)
        .await
        .map_err(quiz_error)?;
    Ok(Json(view))
}
