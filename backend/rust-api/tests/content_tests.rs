use axum::{http::StatusCode, routing::post, Json, Router};
use edugenie_api::{
    config::Config,
    models::lesson::{ContentOrigin, LessonPlanRequest},
    services::content_service::ContentGenerator,
};
use serde_json::json;

mod common;

/// Serves a fixed chat-completion reply on an ephemeral port; returns the endpoint URL.
async fn spawn_completion_stub(status: StatusCode, content: String) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || {
            let content = content.clone();
            async move {
                (
                    status,
                    Json(json!({
                        "choices": [{ "message": { "role": "assistant", "content": content } }]
                    })),
                )
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1/chat/completions", addr)
}

fn live_config(api_url: String) -> Config {
    Config {
        completion_api_url: api_url,
        completion_api_key: Some("sk-test".to_string()),
        completion_timeout_seconds: 5,
        ..common::test_config()
    }
}

fn question(n: usize) -> serde_json::Value {
    json!({
        "question": format!("Question {}?", n),
        "options": ["A", "B", "C", "D"],
        "correctAnswer": "B",
        "explanation": "Because B."
    })
}

#[tokio::test]
async fn test_well_formed_quiz_reply_is_live() {
    let questions: Vec<_> = (1..=10).map(question).collect();
    let reply = format!("```json\n{}\n```", json!(questions));
    let url = spawn_completion_stub(StatusCode::OK, reply).await;

    let generator = ContentGenerator::new(&live_config(url)).unwrap();
    assert!(!generator.is_demo());

    let quiz = generator.generate_quiz("Fractions", "Grade 5").await;
    assert_eq!(quiz.origin, ContentOrigin::Live);
    assert_eq!(quiz.content.total_questions, 10);
    assert_eq!(quiz.content.multiple_choice[0].prompt, "Question 1?");
    assert_eq!(quiz.content.multiple_choice[0].correct_option, "B");
}

#[tokio::test]
async fn test_malformed_reply_degrades_to_demo_payload() {
    let url = spawn_completion_stub(
        StatusCode::OK,
        "Sorry, I cannot produce JSON today.".to_string(),
    )
    .await;

    let generator = ContentGenerator::new(&live_config(url)).unwrap();
    let quiz = generator.generate_quiz("Fractions", "Grade 5").await;

    assert!(matches!(quiz.origin, ContentOrigin::Degraded { .. }));
    assert_eq!(quiz.content.total_questions, 10);
    assert!(quiz.content.multiple_choice[0].prompt.contains("Fractions"));
}

#[tokio::test]
async fn test_upstream_error_status_degrades() {
    let url = spawn_completion_stub(StatusCode::INTERNAL_SERVER_ERROR, String::new()).await;

    let generator = ContentGenerator::new(&live_config(url)).unwrap();
    let lesson = generator
        .generate_lesson(&LessonPlanRequest {
            subject: "Maths".to_string(),
            grade: "Grade 5".to_string(),
            topic: "Fractions".to_string(),
            duration: "45".to_string(),
        })
        .await;

    match lesson.origin {
        ContentOrigin::Degraded { reason } => assert!(reason.contains("500")),
        other => panic!("expected degraded origin, got {:?}", other),
    }
    assert_eq!(lesson.content.learning_objectives.len(), 5);
}

#[tokio::test]
async fn test_live_doubt_answer_is_reply_text() {
    let url = spawn_completion_stub(
        StatusCode::OK,
        "  Plants turn light into chemical energy.  ".to_string(),
    )
    .await;

    let generator = ContentGenerator::new(&live_config(url)).unwrap();
    let doubt = generator.resolve_doubt("What is photosynthesis?").await;

    assert_eq!(doubt.origin, ContentOrigin::Live);
    assert_eq!(doubt.content.answer, "Plants turn light into chemical energy.");
}

#[tokio::test]
async fn test_placeholder_key_means_demo() {
    let generator = ContentGenerator::new(&Config {
        completion_api_key: Some("demo-key".to_string()),
        ..common::test_config()
    })
    .unwrap();

    assert!(generator.is_demo());
    let quiz = generator.generate_quiz("Fractions", "Grade 5").await;
    assert_eq!(quiz.origin, ContentOrigin::Demo);
}

#[tokio::test]
async fn test_quiz_endpoint_reports_live_origin() {
    let questions: Vec<_> = (1..=10).map(question).collect();
    let url = spawn_completion_stub(StatusCode::OK, json!({ "questions": questions }).to_string()).await;

    let (app, _) = common::create_test_app_with(live_config(url));
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/quizzes",
        Some(&token),
        Some(json!({ "topic": "Fractions", "grade": "Grade 5" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["origin"]["kind"], "live");
    assert_eq!(body["quiz_session"]["current_question"]["question"], "Question 1?");
}
