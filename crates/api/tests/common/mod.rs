#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, Response, StatusCode};
use axum::Router;
use devpulse_api::auth::jwt::{generate_access_token, JwtConfig};
use devpulse_api::auth::password::hash_password;
use devpulse_api::billing::{create_provider, PaymentError, PaymentProvider};
use devpulse_api::config::{BillingConfig, PaymentConfig, ServerConfig, StripeConfig};
use devpulse_api::router::build_app_router;
use devpulse_api::state::AppState;
use devpulse_core::billing::SubscriptionChange;
use devpulse_core::subscription::SubscriptionStatus;
use devpulse_db::models::user::{CreateUser, User};
use devpulse_db::repositories::UserRepo;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";
pub const WEBHOOK_SECRET: &str = "whsec_test";

/// Build a test `ServerConfig` with safe defaults and the in-process
/// payment provider.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        billing: BillingConfig {
            payment: PaymentConfig::Dummy,
            app_base_url: "http://localhost:5173".to_string(),
        },
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let payments = create_provider(&config.billing.payment);
    build_test_app_with(pool, config, payments)
}

/// Like [`build_test_app`], with an explicit config and payment provider.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    payments: Arc<dyn PaymentProvider>,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        payments,
    };
    build_app_router(state, &config)
}

/// A Stripe provider config. Only webhook validation is usable offline.
pub fn stripe_config(webhook_secret: Option<&str>) -> PaymentConfig {
    PaymentConfig::Stripe(StripeConfig {
        secret_key: "sk_test_offline".to_string(),
        price_id: "price_test".to_string(),
        webhook_secret: webhook_secret.map(str::to_string),
    })
}

/// A provider whose every outbound call fails, as when the billing API is
/// down.
pub struct UnreachableProvider;

#[async_trait]
impl PaymentProvider for UnreachableProvider {
    async fn create_customer(&self, _user: &User) -> Result<String, PaymentError> {
        Err(PaymentError::ProviderApi("connection refused".to_string()))
    }

    async fn create_checkout_session(
        &self,
        _customer_id: &str,
        _user_id: i64,
        _success_url: &str,
        _cancel_url: &str,
    ) -> Result<String, PaymentError> {
        Err(PaymentError::ProviderApi("connection refused".to_string()))
    }

    async fn create_billing_portal_session(
        &self,
        _customer_id: &str,
        _return_url: &str,
    ) -> Result<String, PaymentError> {
        Err(PaymentError::ProviderApi("connection refused".to_string()))
    }

    async fn validate_webhook(
        &self,
        _headers: &HeaderMap,
        _body: &str,
    ) -> Result<Option<SubscriptionChange>, PaymentError> {
        Ok(None)
    }
}

/// Insert a user directly and return it.
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        full_name: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Insert a premium user directly and return it.
pub async fn create_premium_user(pool: &PgPool, username: &str) -> User {
    let user = create_user(pool, username).await;
    UserRepo::set_subscription_status(pool, user.id, SubscriptionStatus::Premium)
        .await
        .expect("status update should succeed");
    user
}

/// A valid access token for `user`.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &test_config().jwt).expect("token generation should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = builder("GET", uri, token).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    let request = builder("POST", uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    let request = builder("PUT", uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = builder("DELETE", uri, token).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POST a raw body with extra headers.
pub async fn post_raw(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

/// Create a project through the API and return its JSON.
pub async fn create_project(app: Router, token: &str, name: &str) -> Value {
    let response = post_json(
        app,
        "/api/projects",
        Some(token),
        serde_json::json!({ "name": name, "description": "test project" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a service integration through the API and return its JSON.
pub async fn create_integration(
    app: Router,
    token: &str,
    project_id: i64,
    service_type: &str,
) -> Value {
    let response = post_json(
        app,
        "/api/service-integrations",
        Some(token),
        serde_json::json!({
            "projectId": project_id,
            "serviceType": service_type,
            "credentials": { "apiKey": "sk_live_abcd1234", "apiSecret": "secret-9876" },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
