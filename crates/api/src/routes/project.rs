//! Route definitions for the `/projects` resource.
//!
//! Also nests the live metrics view under
//! `/projects/{id}/metrics/{service_type}`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, project_metrics};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
/// GET    /{id}/metrics/{service_type}             -> project_metrics::get
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/metrics/{service_type}",
            get(project_metrics::get),
        )
}
