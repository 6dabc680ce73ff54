use axum::http::StatusCode;
use serde_json::json;

mod common;

fn lesson_request() -> serde_json::Value {
    json!({
        "subject": "Science",
        "grade": "Grade 7",
        "topic": "Photosynthesis",
        "duration": "45",
    })
}

#[tokio::test]
async fn test_lesson_plan_in_demo_mode() {
    let (app, state) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/lessons",
        Some(&token),
        Some(lesson_request()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["origins"]["lesson"]["kind"], "demo");
    assert_eq!(body["origins"]["quiz"]["kind"], "demo");
    assert_eq!(body["persisted"], true);

    let plan = &body["lesson_plan"];
    assert_eq!(plan["topic"], "Photosynthesis");
    assert_eq!(plan["learning_objectives"].as_array().unwrap().len(), 5);
    assert_eq!(plan["assessment_questions"].as_array().unwrap().len(), 10);
    assert_eq!(plan["resources"].as_array().unwrap().len(), 3);
    assert_eq!(body["videos"].as_array().unwrap().len(), 3);

    let quiz = &body["quiz_session"];
    assert_eq!(quiz["status"], "in_progress");
    assert_eq!(quiz["lesson_plan_id"], plan["id"]);
    assert_eq!(state.quizzes.session_count().await, 1);

    let recent = state
        .backend
        .recent_lesson_plans("demo-user-123", 5)
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].title, "Science: Photosynthesis");
    assert_eq!(recent[0].id, plan["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_lesson_plan_requires_auth_and_valid_body() {
    let (app, _) = common::create_test_app();

    let (status, _) =
        common::send(&app, "POST", "/api/v1/lessons", None, Some(lesson_request())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = common::login(&app, "teacher@school.org").await;
    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/lessons",
        Some(&token),
        Some(json!({ "subject": "", "grade": "Grade 7", "topic": "Cells", "duration": "45" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_lesson_replaces_previous_quiz_session() {
    let (app, state) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (_, first) = common::send(
        &app,
        "POST",
        "/api/v1/lessons",
        Some(&token),
        Some(lesson_request()),
    )
    .await;
    let (_, second) = common::send(
        &app,
        "POST",
        "/api/v1/lessons",
        Some(&token),
        Some(lesson_request()),
    )
    .await;

    assert_eq!(state.quizzes.session_count().await, 1);
    let old_id = first["quiz_session"]["session_id"].as_str().unwrap();
    let (status, _) = common::send(
        &app,
        "GET",
        &format!("/api/v1/quizzes/{}", old_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_ne!(second["quiz_session"]["session_id"], first["quiz_session"]["session_id"]);
}

#[tokio::test]
async fn test_doubt_resolver_demo_answer() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/doubts",
        Some(&token),
        Some(json!({ "question": "Why is the sky blue?" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"]["kind"], "demo");
    assert!(body["content"]["answer"]
        .as_str()
        .unwrap()
        .contains("Why is the sky blue?"));
    assert!(!body["content"]["study_tips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_video_search_without_key() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/v1/videos?topic=Fractions&grade=Grade%205",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = common::send(&app, "GET", "/api/v1/videos?topic=Fractions", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
