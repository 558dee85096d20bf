//! Route definitions for the `/subscription` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscription;
use crate::state::AppState;

/// Routes mounted at `/subscription`.
///
/// ```text
/// GET    /status           -> status
/// POST   /checkout         -> checkout
/// POST   /billing-portal   -> billing_portal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(subscription::status))
        .route("/checkout", post(subscription::checkout))
        .route("/billing-portal", post(subscription::billing_portal))
}
