use axum::http::StatusCode;
use base64::{engine::general_purpose, Engine as _};
use edugenie_api::services::demo_content;
use serde_json::json;
use std::time::Duration;

mod common;

#[tokio::test]
async fn test_health_reports_demo_mode() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "demo");
    assert_eq!(body["content"], "demo");
    assert_eq!(body["dependencies"]["backend"]["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_require_basic_auth() {
    let (app, _) = common::create_test_app();

    let (status, _, _) = common::send_raw(&app, "GET", "/metrics", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let credentials = general_purpose::STANDARD.encode("admin:changeme");
    let response = tower::ServiceExt::oneshot(
        app.clone(),
        axum::http::Request::builder()
            .uri("/metrics")
            .header("authorization", format!("Basic {}", credentials))
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trace_id_is_echoed() {
    let (app, _) = common::create_test_app();

    let response = tower::ServiceExt::oneshot(
        app.clone(),
        axum::http::Request::builder()
            .uri("/health")
            .header("x-trace-id", "trace-abc")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.headers()["x-trace-id"], "trace-abc");
}

#[tokio::test]
async fn test_dashboard_for_new_teacher_session() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(&app, "GET", "/api/v1/dashboard", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_lessons"], 0);
    assert_eq!(body["stats"]["total_quizzes"], 0);
    assert_eq!(body["stats"]["average_score"], 0);
    assert_eq!(body["stats"]["groups"], 2);
    assert_eq!(body["recent_activity"], json!([]));
}

#[tokio::test]
async fn test_dashboard_reflects_lessons_and_quiz_results() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, lesson) = common::send(
        &app,
        "POST",
        "/api/v1/lessons",
        Some(&token),
        Some(json!({
            "subject": "Science",
            "grade": "Grade 7",
            "topic": "Photosynthesis",
            "duration": "45",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let quiz_id = lesson["quiz_session"]["session_id"].as_str().unwrap().to_string();

    // Eight correct answers out of ten, ending on the last question.
    let key = demo_content::quiz("Photosynthesis", "Grade 7").multiple_choice;
    let last = key.len() - 1;
    for (index, question) in key.iter().enumerate() {
        let option = if index < 8 {
            question.correct_option.clone()
        } else {
            question
                .options
                .iter()
                .find(|o| **o != question.correct_option)
                .cloned()
                .unwrap()
        };
        let (status, _) = common::send(
            &app,
            "POST",
            &format!("/api/v1/quizzes/{}/answers", quiz_id),
            Some(&token),
            Some(json!({ "question_index": index, "option": option })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        if index < last {
            let (status, _) = common::send(
                &app,
                "POST",
                &format!("/api/v1/quizzes/{}/advance", quiz_id),
                Some(&token),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
    }
    let (status, view) = common::send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{}/submit", quiz_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["result"]["score"], 80);

    let mut body = json!(null);
    for _ in 0..50 {
        let (_, current) =
            common::send(&app, "GET", "/api/v1/dashboard", Some(&token), None).await;
        body = current;
        if body["stats"]["total_quizzes"] == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(body["stats"]["total_lessons"], 1);
    assert_eq!(body["stats"]["total_quizzes"], 1);
    assert_eq!(body["stats"]["average_score"], 80);
    assert_eq!(body["recent_activity"][0]["title"], "Science: Photosynthesis");
}
