//! Handlers for the `/metrics` resource: stored metric samples.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::{DbId, Timestamp};
use devpulse_db::models::metric::{CreateMetric, Metric, MetricFilter};
use devpulse_db::repositories::MetricRepo;
use serde::Deserialize;

use super::owned_project;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricListParams {
    pub project_id: DbId,
    pub service_type: Option<ServiceType>,
    pub metric_type: Option<String>,
    /// Inclusive lower bound, RFC 3339.
    pub start_date: Option<String>,
    /// Inclusive upper bound, RFC 3339.
    pub end_date: Option<String>,
}

fn parse_bound(name: &str, value: Option<&str>) -> AppResult<Option<Timestamp>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| AppError::BadRequest(format!("{name} must be an RFC 3339 timestamp")))
        })
        .transpose()
}

async fn owned_metric(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Metric> {
    let metric = MetricRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Metric", id))?;
    owned_project(&state.pool, user_id, metric.project_id)
        .await
        .map_err(|_| AppError::not_found("Metric", id))?;
    Ok(metric)
}

/// POST /api/metrics
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateMetric>,
) -> AppResult<(StatusCode, Json<Metric>)> {
    owned_project(&state.pool, auth.user_id, input.project_id).await?;
    let metric = MetricRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}

/// GET /api/metrics?projectId=&serviceType=&metricType=&startDate=&endDate=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MetricListParams>,
) -> AppResult<Json<Vec<Metric>>> {
    let filter = MetricFilter {
        service_type: params.service_type,
        metric_type: params.metric_type,
        start: parse_bound("startDate", params.start_date.as_deref())?,
        end: parse_bound("endDate", params.end_date.as_deref())?,
    };
    owned_project(&state.pool, auth.user_id, params.project_id).await?;

    let metrics = MetricRepo::list_by_project(&state.pool, params.project_id, &filter).await?;
    Ok(Json(metrics))
}

/// GET /api/metrics/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Metric>> {
    let metric = owned_metric(&state, auth.user_id, id).await?;
    Ok(Json(metric))
}

/// DELETE /api/metrics/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_metric(&state, auth.user_id, id).await?;
    if MetricRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Metric", id))
    }
}
