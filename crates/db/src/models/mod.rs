//! Row types (`FromRow`) and the create/update DTOs accepted by the API.
//!
//! JSON field names are camelCase throughout.

pub mod alert;
pub mod dashboard_widget;
pub mod metric;
pub mod project;
pub mod service_integration;
pub mod user;
