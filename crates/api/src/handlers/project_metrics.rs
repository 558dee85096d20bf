//! Live metrics for one service on one project.

use axum::extract::{Path, State};
use axum::Json;
use devpulse_core::date_range::DateRange;
use devpulse_core::providers::{provider_for, MetricsOptions, ServiceMetrics};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use devpulse_db::repositories::ServiceIntegrationRepo;
use serde::{Deserialize, Serialize};

use super::owned_project;
use crate::error::{AppError, AppResult};
use crate::extract::ApiQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub range: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetricsResponse {
    pub project_id: DbId,
    pub service_type: ServiceType,
    pub range: DateRange,
    pub metrics: ServiceMetrics,
}

/// GET /api/projects/{id}/metrics/{service_type}?range=24h|7d|30d
///
/// Reads through the project's active integration for the service and
/// stamps it as synced.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, service_type)): Path<(DbId, String)>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<ProjectMetricsResponse>> {
    let service_type: ServiceType = service_type.parse()?;
    owned_project(&state.pool, auth.user_id, project_id).await?;

    let integration =
        ServiceIntegrationRepo::find_active_for_service(&state.pool, project_id, service_type)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No active {service_type} integration on project {project_id}"
                ))
            })?;

    let range = DateRange::parse_lenient(params.range.as_deref());
    let options = MetricsOptions {
        range,
        ..Default::default()
    };
    let metrics = provider_for(service_type)
        .metrics(&integration.credentials(), &options)
        .await?;

    ServiceIntegrationRepo::mark_synced(&state.pool, integration.id).await?;
    tracing::debug!(
        project_id,
        integration_id = integration.id,
        %service_type,
        range = range.as_str(),
        "Served project metrics",
    );

    Ok(Json(ProjectMetricsResponse {
        project_id,
        service_type,
        range,
        metrics,
    }))
}
