//! Repository for the `alerts` table.
//!
//! Status transitions are not checked here; the HTTP layer rejects
//! backward moves.

use devpulse_core::alert::{AlertSeverity, AlertStatus};
use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert::{Alert, AlertFilter, CreateAlert, UpdateAlert};

const COLUMNS: &str =
    "id, project_id, service_type, title, description, severity, status, created_at, updated_at";

pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new alert. Status defaults to `active`.
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (project_id, service_type, title, description, severity, status)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(input.project_id)
            .bind(input.service_type.as_str())
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.severity.as_str())
            .bind(input.status.map(AlertStatus::as_str))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's alerts, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        filter: &AlertFilter,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts
             WHERE project_id = $1
               AND ($2::TEXT IS NULL OR service_type = $2)
               AND ($3::TEXT IS NULL OR severity = $3)
               AND ($4::TEXT IS NULL OR status = $4)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(project_id)
            .bind(filter.service_type.map(ServiceType::as_str))
            .bind(filter.severity.map(AlertSeverity::as_str))
            .bind(filter.status.map(AlertStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// The most recent active alerts across a user's projects.
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM alerts a
             JOIN projects p ON p.id = a.project_id
             WHERE p.user_id = $1 AND a.status = 'active'
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2",
            qualified("a")
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count active alerts on one project.
    pub async fn count_active_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM alerts WHERE project_id = $1 AND status = 'active'",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update an alert. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAlert,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                severity = COALESCE($4, severity),
                status = COALESCE($5, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.severity.map(AlertSeverity::as_str))
            .bind(input.status.map(AlertStatus::as_str))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn qualified(alias: &str) -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
