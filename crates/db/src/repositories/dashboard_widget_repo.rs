//! Repository for the `dashboard_widgets` table.

use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use devpulse_core::widget::WidgetType;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::dashboard_widget::{
    CreateDashboardWidget, DashboardWidget, UpdateDashboardWidget,
};

const COLUMNS: &str = "id, project_id, name, widget_type, service_type, metric_type, \
    configuration, position, created_at, updated_at";

pub struct DashboardWidgetRepo;

impl DashboardWidgetRepo {
    /// Insert a new widget. `configuration` defaults to `{}`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDashboardWidget,
    ) -> Result<DashboardWidget, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboard_widgets
                (project_id, name, widget_type, service_type, metric_type, configuration, position)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{{}}'::jsonb), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardWidget>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.widget_type.as_str())
            .bind(input.service_type.as_str())
            .bind(&input.metric_type)
            .bind(&input.configuration)
            .bind(Json(input.position))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DashboardWidget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboard_widgets WHERE id = $1");
        sqlx::query_as::<_, DashboardWidget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's widgets in creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<DashboardWidget>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dashboard_widgets
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, DashboardWidget>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a widget. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDashboardWidget,
    ) -> Result<Option<DashboardWidget>, sqlx::Error> {
        let query = format!(
            "UPDATE dashboard_widgets SET
                name = COALESCE($2, name),
                widget_type = COALESCE($3, widget_type),
                service_type = COALESCE($4, service_type),
                metric_type = COALESCE($5, metric_type),
                configuration = COALESCE($6, configuration),
                position = COALESCE($7, position)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardWidget>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.widget_type.map(WidgetType::as_str))
            .bind(input.service_type.map(ServiceType::as_str))
            .bind(&input.metric_type)
            .bind(&input.configuration)
            .bind(input.position.map(Json))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboard_widgets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
