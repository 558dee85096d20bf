//! Alert entity model and DTOs.

use devpulse_core::alert::{AlertSeverity, AlertStatus};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub service_type: ServiceType,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub severity: AlertSeverity,
    #[sqlx(try_from = "String")]
    pub status: AlertStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for raising an alert. Status defaults to `active`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlert {
    pub project_id: DbId,
    pub service_type: ServiceType,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub severity: AlertSeverity,
    pub status: Option<AlertStatus>,
}

/// DTO for updating an alert. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlert {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
}

/// Optional filters for listing a project's alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub service_type: Option<ServiceType>,
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
}
