use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_demo_login_yields_demo_user() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "ms.rivera@school.org", "password": "anything" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "demo-user-123");
    assert_eq!(body["user"]["name"], "ms.rivera");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["mode"], "demo");
    assert_eq!(body["profile"]["role"], "teacher");
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "not-an-email", "password": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_malformed_json_answers_json_400() {
    let (app, _) = common::create_test_app();

    let (status, text, _) = common::send_raw(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!("just a string")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("Failed to parse JSON request body"));
}

#[tokio::test]
async fn test_me_requires_token() {
    let (app, _) = common::create_test_app();

    let (status, _) = common::send(&app, "GET", "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        common::send(&app, "GET", "/api/v1/auth/me", Some("garbage.token.here"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_current_user_and_profile() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "demo-user-123");
    assert_eq!(body["profile"]["email"], "demo@edugenie.com");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (app, state) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;
    assert_eq!(state.auth.session_count().await, 1);

    let (status, _) =
        common::send(&app, "POST", "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.auth.session_count().await, 0);

    let (status, _) = common::send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_creates_student() {
    let (app, _) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "email": "new.pupil@school.org",
            "password": "secret123",
            "name": "New Pupil",
            "role": "student",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["user"]["id"], "demo-user-123");
    assert_eq!(body["profile"]["role"], "student");
    assert_eq!(body["profile"]["name"], "New Pupil");
}

#[tokio::test]
async fn test_signup_validation_and_duplicates() {
    let (app, _) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "email": "short@school.org",
            "password": "123",
            "name": "Short",
            "role": "student",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "email": "john@example.com",
            "password": "secret123",
            "name": "John Again",
            "role": "student",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
