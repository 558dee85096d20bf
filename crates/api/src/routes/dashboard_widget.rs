//! Route definitions for the `/dashboard-widgets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard_widget;
use crate::state::AppState;

/// Routes mounted at `/dashboard-widgets`.
///
/// ```text
/// GET    /             -> list (?projectId=)
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_widget::list).post(dashboard_widget::create))
        .route(
            "/{id}",
            get(dashboard_widget::get_by_id)
                .put(dashboard_widget::update)
                .delete(dashboard_widget::delete),
        )
}
