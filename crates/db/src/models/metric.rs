//! Stored metric sample model and DTOs.

use devpulse_core::service_type::ServiceType;
use devpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `metrics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub service_type: ServiceType,
    pub metric_type: String,
    pub value: Value,
    /// When the sample was taken.
    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a sample. `timestamp` defaults to now.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMetric {
    pub project_id: DbId,
    pub service_type: ServiceType,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub metric_type: String,
    pub value: Value,
    pub timestamp: Option<Timestamp>,
}

/// Optional filters for querying a project's samples. Time bounds are
/// inclusive.
#[derive(Debug, Clone, Default)]
pub struct MetricFilter {
    pub service_type: Option<ServiceType>,
    pub metric_type: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}
