use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET    /overview     -> overview (?range=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/overview", get(dashboard::overview))
}
