//! Daily integration refresh tick.
//!
//! Metrics are generated on read, so there is nothing to fetch or store yet.
//! The job reports how many active integrations a refresh would cover.

use std::time::Duration;

use devpulse_db::repositories::ServiceIntegrationRepo;
use devpulse_db::DbPool;
use tokio_util::sync::CancellationToken;

/// How often the refresh job runs.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Run the refresh loop until `cancel` is triggered.
pub async fn run(pool: DbPool, cancel: CancellationToken) {
    run_every(pool, cancel, REFRESH_INTERVAL).await;
}

/// [`run`] with a configurable period.
pub async fn run_every(pool: DbPool, cancel: CancellationToken, period: Duration) {
    tracing::info!(interval_secs = period.as_secs(), "Data refresh job started");

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Data refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                match ServiceIntegrationRepo::count_active(&pool).await {
                    Ok(active) => {
                        tracing::info!(active_integrations = active, "Data refresh: would refresh integrations");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Data refresh: failed to count integrations");
                    }
                }
            }
        }
    }
}
