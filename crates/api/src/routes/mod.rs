pub mod alert;
pub mod dashboard;
pub mod dashboard_widget;
pub mod health;
pub mod metric;
pub mod project;
pub mod service_integration;
pub mod subscription;
pub mod users;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          service health (public)
///
/// /users                                           signup (public)
/// /users/me                                        current user
/// /users/{id}                                      get (self only)
/// /auth/login                                      login (public)
///
/// /projects                                        list, create (plan-limited)
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/metrics/{service_type}            live service metrics (?range=)
///
/// /service-integrations                            list (?projectId=), create (plan-limited)
/// /service-integrations/{id}                       get, update, delete
///
/// /alerts                                          list (?projectId=), create
/// /alerts/{id}                                     get, update, delete
///
/// /dashboard-widgets                               list (?projectId=), create
/// /dashboard-widgets/{id}                          get, update, delete
///
/// /metrics                                         list (?projectId=), create
/// /metrics/{id}                                    get, delete
///
/// /dashboard/overview                              cross-project overview (?range=)
///
/// /subscription/status                             plan and usage
/// /subscription/checkout                           start premium checkout
/// /subscription/billing-portal                     open billing portal
///
/// /webhook/stripe                                  payment events (public, signed)
/// ```
///
/// Everything not marked public requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/users", users::router())
        .route("/auth/login", post(handlers::auth::login))
        .nest("/projects", project::router())
        .nest("/service-integrations", service_integration::router())
        .nest("/alerts", alert::router())
        .nest("/dashboard-widgets", dashboard_widget::router())
        .nest("/metrics", metric::router())
        .nest("/dashboard", dashboard::router())
        .nest("/subscription", subscription::router())
        .route("/webhook/stripe", post(handlers::webhook::stripe))
}
