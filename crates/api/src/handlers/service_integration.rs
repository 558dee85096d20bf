//! Handlers for the `/service-integrations` resource.
//!
//! Stored credentials never leave the server: every response goes through
//! [`ServiceIntegrationView`], which masks them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use devpulse_db::models::service_integration::{
    CreateServiceIntegration, ServiceIntegration, ServiceIntegrationView,
    UpdateServiceIntegration,
};
use devpulse_db::repositories::ServiceIntegrationRepo;
use serde::Deserialize;

use super::owned_project;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::limits::WithinIntegrationLimit;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationListParams {
    pub project_id: DbId,
    pub service_type: Option<ServiceType>,
}

/// Load an integration whose project the caller owns.
async fn owned_integration(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> AppResult<ServiceIntegration> {
    let integration = ServiceIntegrationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ServiceIntegration", id))?;
    owned_project(&state.pool, user_id, integration.project_id)
        .await
        .map_err(|_| AppError::not_found("ServiceIntegration", id))?;
    Ok(integration)
}

/// POST /api/service-integrations
pub async fn create(
    WithinIntegrationLimit(auth): WithinIntegrationLimit,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateServiceIntegration>,
) -> AppResult<(StatusCode, Json<ServiceIntegrationView>)> {
    owned_project(&state.pool, auth.user_id, input.project_id).await?;
    let integration = ServiceIntegrationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = integration.project_id,
        integration_id = integration.id,
        service_type = %integration.service_type,
        "Service integration created",
    );
    Ok((StatusCode::CREATED, Json(integration.into())))
}

/// GET /api/service-integrations?projectId=&serviceType=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IntegrationListParams>,
) -> AppResult<Json<Vec<ServiceIntegrationView>>> {
    owned_project(&state.pool, auth.user_id, params.project_id).await?;
    let integrations =
        ServiceIntegrationRepo::list_by_project(&state.pool, params.project_id, params.service_type)
            .await?;
    Ok(Json(integrations.into_iter().map(Into::into).collect()))
}

/// GET /api/service-integrations/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ServiceIntegrationView>> {
    let integration = owned_integration(&state, auth.user_id, id).await?;
    Ok(Json(integration.into()))
}

/// PUT /api/service-integrations/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateServiceIntegration>,
) -> AppResult<Json<ServiceIntegrationView>> {
    owned_integration(&state, auth.user_id, id).await?;
    let integration = ServiceIntegrationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("ServiceIntegration", id))?;
    Ok(Json(integration.into()))
}

/// DELETE /api/service-integrations/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_integration(&state, auth.user_id, id).await?;
    if ServiceIntegrationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ServiceIntegration", id))
    }
}
