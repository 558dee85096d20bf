//! Handlers for the `/alerts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devpulse_core::alert::{validate_status_transition, AlertSeverity, AlertStatus};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use devpulse_db::models::alert::{Alert, AlertFilter, CreateAlert, UpdateAlert};
use devpulse_db::repositories::AlertRepo;
use serde::Deserialize;

use super::owned_project;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListParams {
    pub project_id: DbId,
    pub service_type: Option<ServiceType>,
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
}

async fn owned_alert(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Alert> {
    let alert = AlertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Alert", id))?;
    owned_project(&state.pool, user_id, alert.project_id)
        .await
        .map_err(|_| AppError::not_found("Alert", id))?;
    Ok(alert)
}

/// POST /api/alerts
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateAlert>,
) -> AppResult<(StatusCode, Json<Alert>)> {
    owned_project(&state.pool, auth.user_id, input.project_id).await?;
    let alert = AlertRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// GET /api/alerts?projectId=&serviceType=&severity=&status=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AlertListParams>,
) -> AppResult<Json<Vec<Alert>>> {
    owned_project(&state.pool, auth.user_id, params.project_id).await?;
    let filter = AlertFilter {
        service_type: params.service_type,
        severity: params.severity,
        status: params.status,
    };
    let alerts = AlertRepo::list_by_project(&state.pool, params.project_id, &filter).await?;
    Ok(Json(alerts))
}

/// GET /api/alerts/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Alert>> {
    let alert = owned_alert(&state, auth.user_id, id).await?;
    Ok(Json(alert))
}

/// PUT /api/alerts/{id}
///
/// Status may only move forward: active, acknowledged, resolved.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateAlert>,
) -> AppResult<Json<Alert>> {
    let current = owned_alert(&state, auth.user_id, id).await?;
    if let Some(next) = input.status {
        validate_status_transition(current.status, next)?;
    }

    let alert = AlertRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Alert", id))?;

    if alert.status != current.status {
        tracing::info!(
            alert_id = id,
            from = current.status.as_str(),
            to = alert.status.as_str(),
            "Alert status changed",
        );
    }
    Ok(Json(alert))
}

/// DELETE /api/alerts/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_alert(&state, auth.user_id, id).await?;
    if AlertRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Alert", id))
    }
}
