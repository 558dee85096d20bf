//! Repository for the `service_integrations` table.

use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::service_integration::{
    CreateServiceIntegration, ServiceIntegration, UpdateServiceIntegration,
};

const COLUMNS: &str = "id, project_id, service_type, credentials, active, last_synced_at, \
    created_at, updated_at";

/// Same columns, qualified for joins against `projects`.
const QUALIFIED_COLUMNS: &str = "si.id, si.project_id, si.service_type, si.credentials, \
    si.active, si.last_synced_at, si.created_at, si.updated_at";

pub struct ServiceIntegrationRepo;

impl ServiceIntegrationRepo {
    /// Insert a new integration. `active` defaults to `true`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateServiceIntegration,
    ) -> Result<ServiceIntegration, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_integrations (project_id, service_type, credentials, active)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceIntegration>(&query)
            .bind(input.project_id)
            .bind(input.service_type.as_str())
            .bind(&input.credentials)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ServiceIntegration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_integrations WHERE id = $1");
        sqlx::query_as::<_, ServiceIntegration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's integrations, optionally narrowed to one service.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        service_type: Option<ServiceType>,
    ) -> Result<Vec<ServiceIntegration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_integrations
             WHERE project_id = $1
               AND ($2::TEXT IS NULL OR service_type = $2)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ServiceIntegration>(&query)
            .bind(project_id)
            .bind(service_type.map(ServiceType::as_str))
            .fetch_all(pool)
            .await
    }

    /// The most recently created active integration of a service on a project.
    pub async fn find_active_for_service(
        pool: &PgPool,
        project_id: DbId,
        service_type: ServiceType,
    ) -> Result<Option<ServiceIntegration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_integrations
             WHERE project_id = $1 AND service_type = $2 AND active
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ServiceIntegration>(&query)
            .bind(project_id)
            .bind(service_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// All active integrations across a user's projects.
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ServiceIntegration>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}
             FROM service_integrations si
             JOIN projects p ON p.id = si.project_id
             WHERE p.user_id = $1 AND si.active
             ORDER BY si.project_id ASC, si.id ASC"
        );
        sqlx::query_as::<_, ServiceIntegration>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count integrations across all of a user's projects.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)
             FROM service_integrations si
             JOIN projects p ON p.id = si.project_id
             WHERE p.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Count active integrations system-wide.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM service_integrations WHERE active")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Update an integration. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateServiceIntegration,
    ) -> Result<Option<ServiceIntegration>, sqlx::Error> {
        let query = format!(
            "UPDATE service_integrations SET
                service_type = COALESCE($2, service_type),
                credentials = COALESCE($3, credentials),
                active = COALESCE($4, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceIntegration>(&query)
            .bind(id)
            .bind(input.service_type.map(ServiceType::as_str))
            .bind(&input.credentials)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_synced_at` with the current time.
    pub async fn mark_synced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE service_integrations SET last_synced_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM service_integrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
