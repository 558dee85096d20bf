//! Dashboard widget entity model and DTOs.

use devpulse_core::service_type::ServiceType;
use devpulse_core::types::{DbId, Timestamp};
use devpulse_core::widget::{WidgetPosition, WidgetType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `dashboard_widgets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidget {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub widget_type: WidgetType,
    #[sqlx(try_from = "String")]
    pub service_type: ServiceType,
    pub metric_type: String,
    pub configuration: Value,
    pub position: Json<WidgetPosition>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn validate_position(position: &WidgetPosition) -> Result<(), ValidationError> {
    position.validate().map_err(|e| {
        let mut err = ValidationError::new("position");
        err.message = Some(e.to_string().into());
        err
    })
}

/// DTO for adding a widget to a project's dashboard.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardWidget {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub widget_type: WidgetType,
    pub service_type: ServiceType,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub metric_type: String,
    pub configuration: Option<Value>,
    #[validate(custom(function = "validate_position"))]
    pub position: WidgetPosition,
}

/// DTO for updating a widget. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDashboardWidget {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    pub widget_type: Option<WidgetType>,
    pub service_type: Option<ServiceType>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub metric_type: Option<String>,
    pub configuration: Option<Value>,
    #[validate(custom(function = "validate_position"))]
    pub position: Option<WidgetPosition>,
}
