//! Signup, login, and token checks.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_signup_login_and_profile() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let token = signup(&app, "Alice").await;
    assert!(token.starts_with("tct_"));

    let (status, body) = send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["username"], "Alice");
    assert!(body.get("password_hash").is_none());

    // Username lookup ignores case.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({"username": "alice", "password": "correct horse"})),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    let second_token = body["token"].as_str().unwrap();
    assert_ne!(second_token, token);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/auth/me",
        Some(second_token),
        Some(json!({"username": "alice.q", "email": "aq@example.com"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["username"], "alice.q");
    assert_eq!(body["email"], "aq@example.com");
}

#[actix_rt::test]
async fn test_signup_rejects_bad_input_and_duplicates() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    signup(&app, "alice").await;

    let attempts = [
        (json!({"username": "ALICE", "email": "a@b.c", "password": "secret1"}), 409),
        (json!({"username": "bob", "email": "a@b.c", "password": "short"}), 400),
        (json!({"username": "bob", "email": "no-at-sign", "password": "secret1"}), 400),
        (json!({"username": "  ", "email": "a@b.c", "password": "secret1"}), 400),
    ];

    for (payload, expected) in attempts {
        let (status, body) = send(&app, "POST", "/api/v1/auth/signup", None, Some(payload)).await;
        assert_eq!(status, expected, "{}", body);
        assert!(body["error"].is_string());
    }
}

#[actix_rt::test]
async fn test_wrong_password_and_missing_token_are_unauthorized() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    signup(&app, "alice").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({"username": "alice", "password": "wrong horse"})),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, body) = send(&app, "GET", "/api/v1/projects", None, None).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = send(&app, "GET", "/api/v1/projects", Some("tct_bogus"), None).await;
    assert_eq!(status, 401);
}
