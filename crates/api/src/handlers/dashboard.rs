//! Cross-project dashboard overview.
//!
//! Fans out to every active integration the caller owns. One failing
//! service does not fail the response; its entry carries the error instead.

use axum::extract::State;
use axum::Json;
use devpulse_core::date_range::DateRange;
use devpulse_core::providers::{provider_for, MetricsOptions, ServiceMetrics, ServiceStatus};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use devpulse_db::models::alert::Alert;
use devpulse_db::models::service_integration::ServiceIntegration;
use devpulse_db::repositories::{AlertRepo, ProjectRepo, ServiceIntegrationRepo};
use futures::future::join_all;
use serde::Serialize;

use super::project_metrics::RangeParams;
use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// How many active alerts the overview lists.
const RECENT_ALERT_LIMIT: i64 = 10;

/// Metrics and health for one service that answered.
#[derive(Debug, Serialize)]
pub struct ServiceSnapshot {
    pub status: ServiceStatus,
    pub metrics: ServiceMetrics,
}

/// Result of querying one integration. Serializes as `{"ok": {...}}` or
/// `{"error": "..."}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceOutcome {
    Ok(ServiceSnapshot),
    Error(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOverview {
    pub integration_id: DbId,
    pub project_id: DbId,
    pub service_type: ServiceType,
    pub result: ServiceOutcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub integration_count: usize,
    pub active_alert_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub range: DateRange,
    pub services: Vec<ServiceOverview>,
    pub projects: Vec<ProjectSummary>,
    pub recent_alerts: Vec<Alert>,
}

async fn query_service(integration: &ServiceIntegration, options: &MetricsOptions) -> ServiceOutcome {
    let provider = provider_for(integration.service_type);
    let credentials = integration.credentials();

    let (metrics, status) = futures::join!(
        provider.metrics(&credentials, options),
        provider.status(&credentials),
    );

    match (metrics, status) {
        (Ok(metrics), Ok(status)) => ServiceOutcome::Ok(ServiceSnapshot { status, metrics }),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(
                integration_id = integration.id,
                service_type = %integration.service_type,
                error = %e,
                "Service query failed",
            );
            ServiceOutcome::Error(e.to_string())
        }
    }
}

/// GET /api/dashboard/overview?range=24h|7d|30d
pub async fn overview(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RangeParams>,
) -> AppResult<Json<DashboardOverview>> {
    let range = DateRange::parse_lenient(params.range.as_deref());
    let options = MetricsOptions {
        range,
        ..Default::default()
    };

    let integrations = ServiceIntegrationRepo::list_active_for_user(&state.pool, auth.user_id).await?;
    let outcomes = join_all(
        integrations
            .iter()
            .map(|integration| query_service(integration, &options)),
    )
    .await;

    let services = integrations
        .iter()
        .zip(outcomes)
        .map(|(integration, result)| ServiceOverview {
            integration_id: integration.id,
            project_id: integration.project_id,
            service_type: integration.service_type,
            result,
        })
        .collect();

    let projects = ProjectRepo::list_by_user(&state.pool, auth.user_id).await?;
    let mut summaries = Vec::with_capacity(projects.len());
    for project in projects {
        let integration_count =
            ServiceIntegrationRepo::list_by_project(&state.pool, project.id, None)
                .await?
                .len();
        let active_alert_count = AlertRepo::count_active_by_project(&state.pool, project.id).await?;
        summaries.push(ProjectSummary {
            id: project.id,
            name: project.name,
            integration_count,
            active_alert_count,
        });
    }

    let recent_alerts =
        AlertRepo::list_active_for_user(&state.pool, auth.user_id, RECENT_ALERT_LIMIT).await?;

    Ok(Json(DashboardOverview {
        range,
        services,
        projects: summaries,
        recent_alerts,
    }))
}
