//! Integration tests for signup, login and the `/users` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get, post_json, token_for, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_creates_free_user_without_password_hash(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/users",
        None,
        json!({
            "username": "alice",
            "password": "long-enough-password",
            "email": "alice@example.com",
            "fullName": "Alice Example",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["fullName"], "Alice Example");
    assert_eq!(json["subscriptionStatus"], "free");
    assert_eq!(json["availableTokens"], 0);
    assert!(json.get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_with_taken_username_is_409(pool: PgPool) {
    create_user(&pool, "taken").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/users",
        None,
        json!({ "username": "taken", "password": "long-enough-password", "email": "t@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_with_short_password_reports_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/users",
        None,
        json!({ "username": "bob", "password": "short", "email": "bob@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["password"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_cannot_choose_subscription_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/users",
        None,
        json!({
            "username": "sneaky",
            "password": "long-enough-password",
            "email": "sneaky@example.com",
            "subscriptionStatus": "premium",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["subscriptionStatus"], "free");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_usable_for_me(pool: PgPool) {
    let user = create_user(&pool, "carol").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/auth/login",
        None,
        json!({ "username": "carol", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    let token = json["accessToken"].as_str().expect("accessToken").to_string();

    let response = get(app, "/api/users/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], "carol");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    create_user(&pool, "dave").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        None,
        json!({ "username": "dave", "password": "incorrect-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_unknown_user_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/login",
        None,
        json!({ "username": "ghost", "password": "whatever-it-is" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reading_another_user_is_403(pool: PgPool) {
    let erin = create_user(&pool, "erin").await;
    let frank = create_user(&pool, "frank").await;
    let app = common::build_test_app(pool);
    let token = token_for(&erin);

    let own = get(app.clone(), &format!("/api/users/{}", erin.id), Some(&token)).await;
    assert_eq!(own.status(), StatusCode::OK);

    let other = get(app, &format!("/api/users/{}", frank.id), Some(&token)).await;
    assert_eq!(other.status(), StatusCode::FORBIDDEN);
}
