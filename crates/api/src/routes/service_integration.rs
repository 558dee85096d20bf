//! Route definitions for the `/service-integrations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::service_integration;
use crate::state::AppState;

/// Routes mounted at `/service-integrations`.
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
        .route("/", get(service_integration::list).post(service_integration::create))
        .route(
            "/{id}",
            get(service_integration::get_by_id)
                .put(service_integration::update)
                .delete(service_integration::delete),
        )
}
