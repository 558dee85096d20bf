//! Service integration entity model and DTOs.
//!
//! [`ServiceIntegration`] carries plaintext credentials and is deliberately
//! not `Serialize`; responses go through [`ServiceIntegrationView`], which
//! masks them.

use devpulse_core::credentials::{mask_credentials, Credentials};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `service_integrations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceIntegration {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub service_type: ServiceType,
    pub credentials: Value,
    pub active: bool,
    pub last_synced_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceIntegration {
    /// The key/secret pair stored in the credentials JSON.
    pub fn credentials(&self) -> Credentials {
        Credentials::from_json(&self.credentials)
    }
}

/// Client-facing representation with masked credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIntegrationView {
    pub id: DbId,
    pub project_id: DbId,
    pub service_type: ServiceType,
    pub credentials: Value,
    pub active: bool,
    pub last_synced_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ServiceIntegration> for ServiceIntegrationView {
    fn from(row: ServiceIntegration) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            service_type: row.service_type,
            credentials: mask_credentials(&row.credentials),
            active: row.active,
            last_synced_at: row.last_synced_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn validate_credentials_object(value: &Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        let mut err = ValidationError::new("credentials_object");
        err.message = Some("credentials must be a JSON object".into());
        Err(err)
    }
}

/// DTO for connecting a service to a project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceIntegration {
    pub project_id: DbId,
    pub service_type: ServiceType,
    #[validate(custom(function = "validate_credentials_object"))]
    pub credentials: Value,
    pub active: Option<bool>,
}

/// DTO for updating an integration. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceIntegration {
    pub service_type: Option<ServiceType>,
    #[validate(custom(function = "validate_credentials_object"))]
    pub credentials: Option<Value>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[test]
    fn view_masks_credentials() {
        let now = Utc::now();
        let row = ServiceIntegration {
            id: 1,
            project_id: 2,
            service_type: ServiceType::Stytch,
            credentials: json!({ "apiKey": "abcd1234", "apiSecret": "ab" }),
            active: true,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(row.credentials().api_key, "abcd1234");

        let view = ServiceIntegrationView::from(row);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["credentials"]["apiKey"], "****1234");
        assert_eq!(json["credentials"]["apiSecret"], "**");
        assert_eq!(json["serviceType"], "stytch");
    }

    #[test]
    fn credentials_must_be_an_object() {
        let input = CreateServiceIntegration {
            project_id: 1,
            service_type: ServiceType::Aws,
            credentials: json!("not-an-object"),
            active: None,
        };
        assert!(input.validate().is_err());
    }
}
