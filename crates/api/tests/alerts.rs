//! Integration tests for the `/alerts` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, create_user, get, post_json, put_json, token_for};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn setup(pool: &PgPool, username: &str) -> (axum::Router, String, i64) {
    let user = create_user(pool, username).await;
    let app = common::build_test_app(pool.clone());
    let token = token_for(&user);
    let project = create_project(app.clone(), &token, "Alerts").await;
    (app, token, project["id"].as_i64().unwrap())
}

async fn raise(app: axum::Router, token: &str, pid: i64, title: &str, severity: &str) -> Value {
    let response = post_json(
        app,
        "/api/alerts",
        Some(token),
        json!({
            "projectId": pid,
            "serviceType": "aws",
            "title": title,
            "description": "CPU above threshold",
            "severity": severity,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_alert_starts_active(pool: PgPool) {
    let (app, token, pid) = setup(&pool, "alerter").await;
    let alert = raise(app, &token, pid, "High CPU", "warning").await;

    assert_eq!(alert["status"], "active");
    assert_eq!(alert["severity"], "warning");
    assert_eq!(alert["projectId"], pid);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolving_persists(pool: PgPool) {
    let (app, token, pid) = setup(&pool, "resolver").await;
    let alert = raise(app.clone(), &token, pid, "High CPU", "error").await;
    let uri = format!("/api/alerts/{}", alert["id"]);

    let response = put_json(app.clone(), &uri, Some(&token), json!({ "status": "resolved" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &uri, Some(&token)).await;
    let fetched = body_json(response).await;
    assert_eq!(fetched["status"], "resolved");
    assert_eq!(fetched["title"], "High CPU");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_status_backwards_is_400(pool: PgPool) {
    let (app, token, pid) = setup(&pool, "rewinder").await;
    let alert = raise(app.clone(), &token, pid, "Disk", "info").await;
    let uri = format!("/api/alerts/{}", alert["id"]);

    let response = put_json(app.clone(), &uri, Some(&token), json!({ "status": "acknowledged" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(app.clone(), &uri, Some(&token), json!({ "status": "active" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = get(app, &uri, Some(&token)).await;
    assert_eq!(body_json(response).await["status"], "acknowledged");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_severity_is_400(pool: PgPool) {
    let (app, token, pid) = setup(&pool, "severe").await;

    let response = post_json(
        app,
        "/api/alerts",
        Some(&token),
        json!({ "projectId": pid, "serviceType": "aws", "title": "x", "severity": "catastrophic" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_severity_and_status(pool: PgPool) {
    let (app, token, pid) = setup(&pool, "lister").await;
    raise(app.clone(), &token, pid, "Low", "info").await;
    let loud = raise(app.clone(), &token, pid, "Loud", "error").await;
    raise(app.clone(), &token, pid, "Louder", "error").await;

    put_json(
        app.clone(),
        &format!("/api/alerts/{}", loud["id"]),
        Some(&token),
        json!({ "status": "resolved" }),
    )
    .await;

    let response = get(
        app.clone(),
        &format!("/api/alerts?projectId={pid}&severity=error"),
        Some(&token),
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get(
        app.clone(),
        &format!("/api/alerts?projectId={pid}&severity=error&status=active"),
        Some(&token),
    )
    .await;
    let active = body_json(response).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["title"], "Louder");

    let response = get(app, &format!("/api/alerts?projectId={pid}"), Some(&token)).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn alert_on_foreign_project_is_404(pool: PgPool) {
    let (app, _token, pid) = setup(&pool, "victim").await;
    let intruder = create_user(&pool, "intruder").await;

    let response = post_json(
        app,
        "/api/alerts",
        Some(&token_for(&intruder)),
        json!({ "projectId": pid, "serviceType": "aws", "title": "x", "severity": "info" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
