//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Callers check that
//! referenced parents exist (and belong to the caller) before inserting.

pub mod alert_repo;
pub mod dashboard_widget_repo;
pub mod metric_repo;
pub mod project_repo;
pub mod service_integration_repo;
pub mod user_repo;

pub use alert_repo::AlertRepo;
pub use dashboard_widget_repo::DashboardWidgetRepo;
pub use metric_repo::MetricRepo;
pub use project_repo::ProjectRepo;
pub use service_integration_repo::ServiceIntegrationRepo;
pub use user_repo::UserRepo;
