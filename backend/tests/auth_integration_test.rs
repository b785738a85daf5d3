//! Integration tests for authentication and role gating

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_success_defaults_to_user_role() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": unique_email("signup"),
        "password": "SecurePassword123!",
        "name": "Alice"
    });

    let (status, response) = app.post("/api/v1/auth/signup", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["role"], "USER");
    assert_eq!(response["name"], "Alice");
    // The password hash must never appear in API responses
    assert!(response.get("password_hash").is_none());
    assert!(response.get("password").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_duplicate_email_conflicts() {
    let app = common::TestApp::new().await;

    let email = unique_email("duplicate");
    let first = json!({
        "email": email,
        "password": "SecurePassword123!",
        "name": "Alice"
    });

    let (status, _) = app.post("/api/v1/auth/signup", &first.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same email, different everything else
    let second = json!({
        "email": email,
        "password": "OtherPassword456!",
        "name": "Bob"
    });
    let (status, _) = app.post("/api/v1/auth/signup", &second.to_string()).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_with_provisioning_code_grants_admin() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": unique_email("admin"),
        "password": "SecurePassword123!",
        "name": "Admin",
        "admin_code": "development-admin-code"
    });

    let (status, response) = app.post("/api/v1/auth/signup", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["role"], "ADMIN");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_with_wrong_code_stays_user() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": unique_email("wrongcode"),
        "password": "SecurePassword123!",
        "name": "Mallory",
        "admin_code": "guessed-wrong"
    });

    let (status, response) = app.post("/api/v1/auth/signup", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["role"], "USER");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_rejects_invalid_email_and_weak_password() {
    let app = common::TestApp::new().await;

    let bad_email = json!({
        "email": "not-an-email",
        "password": "SecurePassword123!",
        "name": "X"
    });
    let (status, _) = app.post("/api/v1/auth/signup", &bad_email.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let weak_password = json!({
        "email": unique_email("weak"),
        "password": "123",
        "name": "X"
    });
    let (status, _) = app
        .post("/api/v1/auth/signup", &weak_password.to_string())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_returns_token_and_identity() {
    let app = common::TestApp::new().await;

    let email = unique_email("login");
    let password = "SecurePassword123!";
    let signup = json!({ "email": email, "password": password, "name": "Carol" });
    app.post("/api/v1/auth/signup", &signup.to_string()).await;

    let login = json!({ "email": email, "password": password });
    let (status, response) = app.post("/api/v1/auth/login", &login.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["token"].as_str().unwrap().is_empty());
    assert_eq!(response["email"], email);
    assert_eq!(response["name"], "Carol");
    assert_eq!(response["role"], "USER");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_failures_are_indistinguishable() {
    let app = common::TestApp::new().await;

    let email = unique_email("enum");
    let signup = json!({
        "email": email,
        "password": "SecurePassword123!",
        "name": "Dave"
    });
    app.post("/api/v1/auth/signup", &signup.to_string()).await;

    // Wrong password for an existing account
    let wrong_password = json!({ "email": email, "password": "WrongPassword!" });
    let (status_a, body_a) = app
        .post("/api/v1/auth/login", &wrong_password.to_string())
        .await;

    // Unknown account entirely
    let ghost = json!({ "email": unique_email("ghost"), "password": "anything123" });
    let (status_b, body_b) = app.post("/api/v1/auth/login", &ghost.to_string()).await;

    // Same status and same body: no user enumeration via error shape
    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a, body_b);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_me_requires_and_honors_token() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let email = unique_email("me");
    let token = common::signup_and_login(&app, &email, "SecurePassword123!", None).await;

    let (status, response) = app.get_auth("/api/v1/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_route_rejections_distinguish_401_from_403() {
    let app = common::TestApp::new().await;

    // Anonymous caller: identity unknown
    let (status, _) = app.get("/api/v1/statistics").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Authenticated USER: identity known, role insufficient
    let user_token = common::signup_and_login(
        &app,
        &unique_email("plain"),
        "SecurePassword123!",
        None,
    )
    .await;
    let (status, _) = app.get_auth("/api/v1/statistics", &user_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // ADMIN passes
    let admin_token = common::signup_and_login(
        &app,
        &unique_email("boss"),
        "SecurePassword123!",
        Some("development-admin-code"),
    )
    .await;
    let (status, _) = app.get_auth("/api/v1/statistics", &admin_token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_changes_own_record() {
    let app = common::TestApp::new().await;

    let email = unique_email("profile");
    let token = common::signup_and_login(&app, &email, "SecurePassword123!", None).await;

    let update = json!({ "name": "Renamed" });
    let (status, response) = app
        .put_auth("/api/v1/auth/profile", &token, &update.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["name"], "Renamed");
    assert_eq!(response["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_password_change_invalidates_old_password() {
    let app = common::TestApp::new().await;

    let email = unique_email("rotate");
    let token = common::signup_and_login(&app, &email, "OldPassword123!", None).await;

    let update = json!({ "password": "NewPassword456!" });
    let (status, _) = app
        .put_auth("/api/v1/auth/profile", &token, &update.to_string())
        .await;
    assert_eq!(status, StatusCode::OK);

    let old_login = json!({ "email": email, "password": "OldPassword123!" });
    let (status, _) = app.post("/api/v1/auth/login", &old_login.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let new_login = json!({ "email": email, "password": "NewPassword456!" });
    let (status, _) = app.post("/api/v1/auth/login", &new_login.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}
