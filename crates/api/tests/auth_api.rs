//! HTTP-level integration tests for registration, login, and `/me`.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_raw, register_and_login, TEST_SECRET};
use serde_json::json;
use tasktrack_api::auth::jwt::{issue_token_at, verify_token, JwtConfig};
use tasktrack_core::types::{new_id, DbId};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_success() {
    let app = common::build_test_app();
    let response = post_json(app, "/register", json!({ "username": "alice", "password": "pw1" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn duplicate_register_is_conflict_regardless_of_password() {
    let app = common::build_test_app();
    post_json(app.clone(), "/register", json!({ "username": "alice", "password": "pw1" })).await;

    for password in ["pw1", "something-else"] {
        let response = post_json(
            app.clone(),
            "/register",
            json!({ "username": "alice", "password": password }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "CONFLICT");
        assert_eq!(json["error"], "User already exists");
    }
}

#[tokio::test]
async fn register_rejects_empty_fields() {
    let app = common::build_test_app();
    let response = post_json(app, "/register", json!({ "username": "", "password": "pw1" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn register_rejects_missing_field() {
    let app = common::build_test_app();
    let response = post_json(app, "/register", json!({ "username": "alice" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = common::build_test_app();
    let response = post_raw(app, "/register", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token_as_json_string() {
    let app = common::build_test_app();
    let creds = json!({ "username": "alice", "password": "pw1" });
    post_json(app.clone(), "/register", creds.clone()).await;

    let response = post_json(app, "/login", creds).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let token = body_json(response).await.as_str().unwrap().to_string();

    assert_eq!(token.split('.').count(), 3, "token must have three segments");

    let config = JwtConfig {
        secret: TEST_SECRET.into(),
        expiry_hours: 8,
    };
    let claims = verify_token(&token, &config).unwrap();
    let now = chrono::Utc::now().timestamp();
    assert!(claims.exp > now + 8 * 3600 - 60 && claims.exp <= now + 8 * 3600);
}

#[tokio::test]
async fn repeated_logins_carry_the_same_user_id() {
    let app = common::build_test_app();
    let first = register_and_login(&app, "alice", "pw1").await;

    let response = post_json(app.clone(), "/login", json!({ "username": "alice", "password": "pw1" })).await;
    let second = body_json(response).await.as_str().unwrap().to_string();

    let me_first = body_json(get_auth(app.clone(), "/me", &first).await).await;
    let me_second = body_json(get_auth(app, "/me", &second).await).await;
    assert_eq!(me_first["id"], me_second["id"]);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_get_identical_401() {
    let app = common::build_test_app();
    register_and_login(&app, "alice", "pw1").await;

    let wrong = post_json(app.clone(), "/login", json!({ "username": "alice", "password": "nope" })).await;
    let unknown = post_json(app, "/login", json!({ "username": "mallory", "password": "pw1" })).await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let wrong = body_json(wrong).await;
    let unknown = body_json(unknown).await;
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["error"], "Invalid credentials");
    assert_eq!(wrong["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Token checks on protected routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_echoes_claims() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "alice", "pw1").await;

    let response = get_auth(app, "/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["id"].as_str().unwrap().parse::<DbId>().is_ok());
    assert!(json["exp"].is_i64());
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = common::build_test_app();
    let response = get(app, "/tasks").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = common::build_test_app();
    let response = get_auth(app, "/me", "not.a.token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let app = common::build_test_app();
    let foreign = JwtConfig {
        secret: "some-other-secret".into(),
        expiry_hours: 8,
    };
    let token = issue_token_at(new_id(), &foreign, chrono::Utc::now().timestamp()).unwrap();

    let response = get_auth(app, "/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let app = common::build_test_app();
    let config = JwtConfig {
        secret: TEST_SECRET.into(),
        expiry_hours: 8,
    };
    // Issued nine hours ago, so it expired an hour ago.
    let issued_at = chrono::Utc::now().timestamp() - 9 * 3600;
    let token = issue_token_at(new_id(), &config, issued_at).unwrap();

    let response = get_auth(app, "/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
