//! Handlers for the `/dashboard-widgets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devpulse_core::types::DbId;
use devpulse_db::models::dashboard_widget::{
    CreateDashboardWidget, DashboardWidget, UpdateDashboardWidget,
};
use devpulse_db::repositories::DashboardWidgetRepo;
use serde::Deserialize;

use super::owned_project;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetListParams {
    pub project_id: DbId,
}

async fn owned_widget(state: &AppState, user_id: DbId, id: DbId) -> AppResult<DashboardWidget> {
    let widget = DashboardWidgetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("DashboardWidget", id))?;
    owned_project(&state.pool, user_id, widget.project_id)
        .await
        .map_err(|_| AppError::not_found("DashboardWidget", id))?;
    Ok(widget)
}

/// POST /api/dashboard-widgets
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateDashboardWidget>,
) -> AppResult<(StatusCode, Json<DashboardWidget>)> {
    owned_project(&state.pool, auth.user_id, input.project_id).await?;
    let widget = DashboardWidgetRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(widget)))
}

/// GET /api/dashboard-widgets?projectId=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<WidgetListParams>,
) -> AppResult<Json<Vec<DashboardWidget>>> {
    owned_project(&state.pool, auth.user_id, params.project_id).await?;
    let widgets = DashboardWidgetRepo::list_by_project(&state.pool, params.project_id).await?;
    Ok(Json(widgets))
}

/// GET /api/dashboard-widgets/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DashboardWidget>> {
    let widget = owned_widget(&state, auth.user_id, id).await?;
    Ok(Json(widget))
}

/// PUT /api/dashboard-widgets/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateDashboardWidget>,
) -> AppResult<Json<DashboardWidget>> {
    owned_widget(&state, auth.user_id, id).await?;
    let widget = DashboardWidgetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("DashboardWidget", id))?;
    Ok(Json(widget))
}

/// DELETE /api/dashboard-widgets/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_widget(&state, auth.user_id, id).await?;
    if DashboardWidgetRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("DashboardWidget", id))
    }
}
