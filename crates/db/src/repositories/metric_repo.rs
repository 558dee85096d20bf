//! Repository for the `metrics` table.

use devpulse_core::service_type::ServiceType;
use devpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::metric::{CreateMetric, Metric, MetricFilter};

const COLUMNS: &str =
    "id, project_id, service_type, metric_type, value, recorded_at, created_at, updated_at";

pub struct MetricRepo;

impl MetricRepo {
    /// Insert a sample. `recorded_at` defaults to now.
    pub async fn create(pool: &PgPool, input: &CreateMetric) -> Result<Metric, sqlx::Error> {
        let query = format!(
            "INSERT INTO metrics (project_id, service_type, metric_type, value, recorded_at)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Metric>(&query)
            .bind(input.project_id)
            .bind(input.service_type.as_str())
            .bind(&input.metric_type)
            .bind(&input.value)
            .bind(input.timestamp)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Metric>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM metrics WHERE id = $1");
        sqlx::query_as::<_, Metric>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Query a project's samples in chronological order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        filter: &MetricFilter,
    ) -> Result<Vec<Metric>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM metrics
             WHERE project_id = $1
               AND ($2::TEXT IS NULL OR service_type = $2)
               AND ($3::TEXT IS NULL OR metric_type = $3)
               AND ($4::TIMESTAMPTZ IS NULL OR recorded_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR recorded_at <= $5)
             ORDER BY recorded_at ASC, id ASC"
        );
        sqlx::query_as::<_, Metric>(&query)
            .bind(project_id)
            .bind(filter.service_type.map(ServiceType::as_str))
            .bind(&filter.metric_type)
            .bind(filter.start)
            .bind(filter.end)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM metrics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
