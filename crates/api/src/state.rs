use std::sync::Arc;

use crate::billing::PaymentProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted and everything else sits
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: devpulse_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Checkout and billing-portal backend.
    pub payments: Arc<dyn PaymentProvider>,
}
