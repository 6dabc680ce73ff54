use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_teacher_lists_seeded_groups() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, body) = common::send(&app, "GET", "/api/v1/groups", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    let science = groups
        .iter()
        .find(|g| g["id"] == "demo-group-science")
        .unwrap();
    assert_eq!(science["member_count"], 2);
    assert_eq!(science["members"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_teacher_creates_group_and_adds_member() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, group) = common::send(
        &app,
        "POST",
        "/api/v1/groups",
        Some(&token),
        Some(json!({ "name": "Chemistry Lab", "description": "Thursday practicals" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(group["member_count"], 0);
    let id = group["id"].as_str().unwrap().to_string();

    let (status, updated) = common::send(
        &app,
        "POST",
        &format!("/api/v1/groups/{}/members", id),
        Some(&token),
        Some(json!({ "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(updated["member_count"], 1);
    assert_eq!(updated["members"][0]["name"], "Jane Smith");

    let (status, _) = common::send(
        &app,
        "POST",
        &format!("/api/v1/groups/{}/members", id),
        Some(&token),
        Some(json!({ "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, text, _) = common::send_raw(
        &app,
        "POST",
        &format!("/api/v1/groups/{}/members", id),
        Some(&token),
        Some(json!({ "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text, "Student not found with this email");

    let (status, fetched) = common::send(
        &app,
        "GET",
        &format!("/api/v1/groups/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Chemistry Lab");
}

#[tokio::test]
async fn test_students_cannot_manage_groups() {
    let (app, _) = common::create_test_app();
    let student = common::signup(&app, "pupil@school.org", "Pupil", "student").await;

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/groups",
        Some(&student),
        Some(json!({ "name": "My Group" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/groups/demo-group-science/members",
        Some(&student),
        Some(json!({ "email": "mike@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = common::send(
        &app,
        "GET",
        "/api/v1/groups/demo-group-science",
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_sees_joined_groups() {
    let (app, _) = common::create_test_app();
    let teacher = common::login(&app, "teacher@school.org").await;
    let student = common::signup(&app, "pupil@school.org", "Pupil", "student").await;

    let (_, body) = common::send(&app, "GET", "/api/v1/groups", Some(&student), None).await;
    assert_eq!(body, json!([]));

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/groups/demo-group-maths/members",
        Some(&teacher),
        Some(json!({ "email": "pupil@school.org" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::send(&app, "GET", "/api/v1/groups", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Mathematics Club");
    assert_eq!(groups[0]["teacher"]["name"], "Demo User");
    assert_eq!(groups[0]["member_count"], 2);
    assert!(groups[0].get("members").is_none());
}

#[tokio::test]
async fn test_group_validation() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/groups/demo-group-maths/members",
        Some(&token),
        Some(json!({ "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/groups",
        Some(&token),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_member_email_lookup_ignores_case() {
    let (app, _) = common::create_test_app();
    let token = common::login(&app, "teacher@school.org").await;

    let (status, group) = common::send(
        &app,
        "POST",
        "/api/v1/groups/demo-group-maths/members",
        Some(&token),
        Some(json!({ "email": "Jane@Example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(group["members"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m["name"] == "Jane Smith"));
}
