//! Push notification metrics (OneSignal).

use async_trait::async_trait;
use serde::Serialize;

use crate::credentials::Credentials;
use crate::service_type::ServiceType;

use super::series::{Precision, SeriesGenerator, TimeSeries};
use super::{
    HealthState, MetricsOptions, ProviderError, ServiceMetrics, ServiceProvider, ServiceStatus,
    Trend,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneSignalMetrics {
    pub notifications_sent: TimeSeries,
    pub delivery_rate: TimeSeries,
    pub open_rate: TimeSeries,
    pub click_through_rate: TimeSeries,
    pub opt_out_rate: TimeSeries,
    pub platform_delivery: PlatformDelivery,
}

/// Delivery rate split by platform.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformDelivery {
    pub ios: TimeSeries,
    pub android: TimeSeries,
    pub web: TimeSeries,
}

pub struct OneSignalProvider;

#[async_trait]
impl ServiceProvider for OneSignalProvider {
    fn service_type(&self) -> ServiceType {
        ServiceType::OneSignal
    }

    async fn metrics(
        &self,
        _credentials: &Credentials,
        options: &MetricsOptions,
    ) -> Result<ServiceMetrics, ProviderError> {
        let mut gen = SeriesGenerator::new(options);
        Ok(ServiceMetrics::OneSignal(OneSignalMetrics {
            notifications_sent: gen.series(5000.0, 15000.0, Precision::Rounded),
            delivery_rate: gen.series(0.95, 0.99, Precision::Exact),
            open_rate: gen.series(0.1, 0.3, Precision::Exact),
            click_through_rate: gen.series(0.05, 0.15, Precision::Exact),
            opt_out_rate: gen.series(0.001, 0.005, Precision::Exact),
            platform_delivery: PlatformDelivery {
                ios: gen.series(0.96, 0.99, Precision::Exact),
                android: gen.series(0.94, 0.98, Precision::Exact),
                web: gen.series(0.9, 0.96, Precision::Exact),
            },
        }))
    }

    async fn status(&self, _credentials: &Credentials) -> Result<ServiceStatus, ProviderError> {
        Ok(ServiceStatus {
            status: HealthState::Healthy,
            health_score: 98.2,
            trend: Trend::Same,
            change_percent: 0.0,
        })
    }
}
