//! Placeholder provider for services without an adapter.

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::service_type::ServiceType;

use super::{EmptyMetrics, MetricsOptions, ProviderError, ServiceMetrics, ServiceProvider, ServiceStatus};

/// Reports empty metrics and refuses status checks.
pub struct StubProvider {
    service: ServiceType,
}

impl StubProvider {
    pub const fn new(service: ServiceType) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ServiceProvider for StubProvider {
    fn service_type(&self) -> ServiceType {
        self.service
    }

    async fn metrics(
        &self,
        _credentials: &Credentials,
        _options: &MetricsOptions,
    ) -> Result<ServiceMetrics, ProviderError> {
        Ok(ServiceMetrics::Empty(EmptyMetrics {}))
    }

    /// Unlike `metrics`, which answers with an empty object, status is an
    /// error so callers never mistake a missing adapter for a healthy one.
    async fn status(&self, _credentials: &Credentials) -> Result<ServiceStatus, ProviderError> {
        Err(ProviderError::NotImplemented {
            service: self.service,
            operation: "status checks",
        })
    }
}
