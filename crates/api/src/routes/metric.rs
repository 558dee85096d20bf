//! Route definitions for the `/metrics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::metric;
use crate::state::AppState;

/// Routes mounted at `/metrics`. Stored samples are immutable: no update.
///
/// ```text
/// GET    /             -> list (?projectId=&serviceType=&metricType=&startDate=&endDate=)
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// DELETE /{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(metric::list).post(metric::create))
        .route("/{id}", get(metric::get_by_id).delete(metric::delete))
}
