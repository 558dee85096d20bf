//! Service provider adapters.
//!
//! Each supported [`ServiceType`] maps to one [`ServiceProvider`] through
//! [`provider_for`]. The concrete providers synthesize plausible time series
//! rather than calling the vendor APIs; `sendbird` and `twilio` are stubs.
//!
//! - [`series`] -- daily data point generation shared by all providers.
//! - [`stytch`], [`onesignal`], [`aws`], [`mixpanel`] -- synthetic providers.
//! - [`stub`] -- placeholder for services without an adapter yet.

pub mod aws;
pub mod mixpanel;
pub mod onesignal;
pub mod series;
pub mod stub;
pub mod stytch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::date_range::DateRange;
use crate::service_type::ServiceType;
use crate::types::Timestamp;

pub use aws::{AwsMetrics, AwsService};
pub use mixpanel::MixpanelMetrics;
pub use onesignal::OneSignalMetrics;
pub use series::{DataPoint, SampleValue, TimeSeries};
pub use stytch::StytchMetrics;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unsupported service type: {0}")]
    UnsupportedServiceType(String),

    #[error("{service} does not support {operation} yet")]
    NotImplemented {
        service: ServiceType,
        operation: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Options and results
// ---------------------------------------------------------------------------

/// Parameters for a metrics request.
#[derive(Debug, Clone, Default)]
pub struct MetricsOptions {
    pub range: DateRange,
    /// Seed for the value generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// The most recent day in the series. `None` means now.
    pub anchor: Option<Timestamp>,
    /// AWS sub-services to include. `None` means all of them.
    pub aws_services: Option<Vec<AwsService>>,
    /// Mixpanel events to report. `None` means the default event set.
    pub events: Option<Vec<String>>,
}

/// Metrics payload returned by a provider. Serializes as the inner object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServiceMetrics {
    Stytch(StytchMetrics),
    OneSignal(OneSignalMetrics),
    Aws(AwsMetrics),
    Mixpanel(MixpanelMetrics),
    Empty(EmptyMetrics),
}

/// The `{}` payload reported by stub providers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyMetrics {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
}

/// Canned health summary for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub status: HealthState,
    /// Percentage, 0-100.
    pub health_score: f64,
    pub trend: Trend,
    pub change_percent: f64,
}

// ---------------------------------------------------------------------------
// Provider trait and dispatch
// ---------------------------------------------------------------------------

/// Adapter for one third-party service.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    fn service_type(&self) -> ServiceType;

    async fn metrics(
        &self,
        credentials: &Credentials,
        options: &MetricsOptions,
    ) -> Result<ServiceMetrics, ProviderError>;

    async fn status(&self, credentials: &Credentials) -> Result<ServiceStatus, ProviderError>;
}

static STYTCH: stytch::StytchProvider = stytch::StytchProvider;
static ONESIGNAL: onesignal::OneSignalProvider = onesignal::OneSignalProvider;
static AWS: aws::AwsProvider = aws::AwsProvider;
static MIXPANEL: mixpanel::MixpanelProvider = mixpanel::MixpanelProvider;
static SENDBIRD: stub::StubProvider = stub::StubProvider::new(ServiceType::Sendbird);
static TWILIO: stub::StubProvider = stub::StubProvider::new(ServiceType::Twilio);

/// Look up the adapter for a service type.
pub fn provider_for(service_type: ServiceType) -> &'static dyn ServiceProvider {
    match service_type {
        ServiceType::Stytch => &STYTCH,
        ServiceType::OneSignal => &ONESIGNAL,
        ServiceType::Aws => &AWS,
        ServiceType::Mixpanel => &MIXPANEL,
        ServiceType::Sendbird => &SENDBIRD,
        ServiceType::Twilio => &TWILIO,
    }
}

fn parse_service_type(service_type: &str) -> Result<ServiceType, ProviderError> {
    service_type
        .parse()
        .map_err(|_| ProviderError::UnsupportedServiceType(service_type.to_string()))
}

/// Fetch metrics for a service identified by name.
pub async fn fetch_service_metrics(
    service_type: &str,
    credentials: &Credentials,
    options: &MetricsOptions,
) -> Result<ServiceMetrics, ProviderError> {
    let service_type = parse_service_type(service_type)?;
    provider_for(service_type)
        .metrics(credentials, options)
        .await
}

/// Fetch the health summary for a service identified by name.
pub async fn fetch_service_status(
    service_type: &str,
    credentials: &Credentials,
) -> Result<ServiceStatus, ProviderError> {
    let service_type = parse_service_type(service_type)?;
    provider_for(service_type).status(credentials).await
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_service_type_has_a_provider() {
        for t in ServiceType::ALL {
            assert_eq!(provider_for(t).service_type(), t);
        }
    }

    #[tokio::test]
    async fn unknown_service_name_is_rejected() {
        let creds = Credentials::default();
        let err = fetch_service_status("pagerduty", &creds).await.unwrap_err();
        assert_eq!(err.to_string(), "Unsupported service type: pagerduty");

        let err = fetch_service_metrics("pagerduty", &creds, &MetricsOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, ProviderError::UnsupportedServiceType(ref s) if s == "pagerduty");
    }

    #[tokio::test]
    async fn stub_metrics_serialize_as_empty_object() {
        let metrics = fetch_service_metrics(
            "twilio",
            &Credentials::default(),
            &MetricsOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(serde_json::to_value(&metrics).unwrap(), serde_json::json!({}));
    }

    #[tokio::test]
    async fn stub_status_is_not_implemented() {
        let err = fetch_service_status("sendbird", &Credentials::default())
            .await
            .unwrap_err();
        assert_matches!(
            err,
            ProviderError::NotImplemented { service: ServiceType::Sendbird, .. }
        );
    }

    #[tokio::test]
    async fn status_payload_uses_camel_case() {
        let status = fetch_service_status("aws", &Credentials::default())
            .await
            .unwrap();
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["healthScore"], 96.3);
        assert_eq!(json["trend"], "down");
        assert_eq!(json["changePercent"], 1.5);
    }
}
