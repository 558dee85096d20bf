//! Cloud infrastructure metrics (AWS), one block per sub-service.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::CoreError;
use crate::service_type::ServiceType;

use super::series::{Precision, SeriesGenerator, TimeSeries};
use super::{
    HealthState, MetricsOptions, ProviderError, ServiceMetrics, ServiceProvider, ServiceStatus,
    Trend,
};

/// An AWS sub-service reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwsService {
    Ec2,
    Lambda,
    S3,
    Rds,
    ApiGateway,
}

impl AwsService {
    pub const ALL: [AwsService; 5] = [
        AwsService::Ec2,
        AwsService::Lambda,
        AwsService::S3,
        AwsService::Rds,
        AwsService::ApiGateway,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AwsService::Ec2 => "ec2",
            AwsService::Lambda => "lambda",
            AwsService::S3 => "s3",
            AwsService::Rds => "rds",
            AwsService::ApiGateway => "apigateway",
        }
    }
}

impl fmt::Display for AwsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AwsService {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AwsService::ALL
            .into_iter()
            .find(|svc| svc.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown AWS service '{s}'")))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ec2Metrics {
    pub cpu_utilization: TimeSeries,
    pub memory_utilization: TimeSeries,
    /// MB/s.
    pub network_in: TimeSeries,
    /// MB/s.
    pub network_out: TimeSeries,
    pub instance_count: TimeSeries,
    pub status_check_failed: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaMetrics {
    pub invocations: TimeSeries,
    pub errors: TimeSeries,
    pub throttles: TimeSeries,
    /// Milliseconds.
    pub duration: TimeSeries,
    pub concurrent_executions: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Metrics {
    /// GB.
    pub bucket_size_bytes: TimeSeries,
    pub number_of_objects: TimeSeries,
    pub all_requests: TimeSeries,
    pub get_requests: TimeSeries,
    pub put_requests: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsMetrics {
    pub cpu_utilization: TimeSeries,
    pub database_connections: TimeSeries,
    /// GB.
    pub free_storage_space: TimeSeries,
    #[serde(rename = "readIOPS")]
    pub read_iops: TimeSeries,
    #[serde(rename = "writeIOPS")]
    pub write_iops: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayMetrics {
    pub count: TimeSeries,
    /// Milliseconds.
    pub latency: TimeSeries,
    pub errors4xx: TimeSeries,
    pub errors5xx: TimeSeries,
    pub cache_hit_count: TimeSeries,
    pub cache_miss_count: TimeSeries,
}

/// Blocks for the requested sub-services; the rest are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AwsMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ec2: Option<Ec2Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<LambdaMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rds: Option<RdsMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apigateway: Option<ApiGatewayMetrics>,
}

pub struct AwsProvider;

impl AwsProvider {
    fn generate(options: &MetricsOptions) -> AwsMetrics {
        let wanted: &[AwsService] = options.aws_services.as_deref().unwrap_or(&AwsService::ALL);
        let mut gen = SeriesGenerator::new(options);
        let mut metrics = AwsMetrics::default();

        if wanted.contains(&AwsService::Ec2) {
            metrics.ec2 = Some(Ec2Metrics {
                cpu_utilization: gen.series(20.0, 80.0, Precision::Tenths),
                memory_utilization: gen.series(30.0, 75.0, Precision::Tenths),
                network_in: gen.series(100.0, 500.0, Precision::Tenths),
                network_out: gen.series(50.0, 250.0, Precision::Tenths),
                instance_count: gen.series(5.0, 15.0, Precision::Count),
                status_check_failed: gen.series(0.0, 2.0, Precision::Count),
            });
        }
        if wanted.contains(&AwsService::Lambda) {
            metrics.lambda = Some(LambdaMetrics {
                invocations: gen.series(1000.0, 5000.0, Precision::Count),
                errors: gen.series(5.0, 50.0, Precision::Count),
                throttles: gen.series(0.0, 10.0, Precision::Count),
                duration: gen.series(100.0, 300.0, Precision::Tenths),
                concurrent_executions: gen.series(10.0, 100.0, Precision::Count),
            });
        }
        if wanted.contains(&AwsService::S3) {
            metrics.s3 = Some(S3Metrics {
                bucket_size_bytes: gen.series(1.0, 10.0, Precision::Tenths),
                number_of_objects: gen.series(1000.0, 10000.0, Precision::Count),
                all_requests: gen.series(5000.0, 20000.0, Precision::Count),
                get_requests: gen.series(1000.0, 10000.0, Precision::Count),
                put_requests: gen.series(500.0, 2000.0, Precision::Count),
            });
        }
        if wanted.contains(&AwsService::Rds) {
            metrics.rds = Some(RdsMetrics {
                cpu_utilization: gen.series(30.0, 90.0, Precision::Tenths),
                database_connections: gen.series(10.0, 100.0, Precision::Count),
                free_storage_space: gen.series(10.0, 50.0, Precision::Tenths),
                read_iops: gen.series(100.0, 1000.0, Precision::Count),
                write_iops: gen.series(50.0, 500.0, Precision::Count),
            });
        }
        if wanted.contains(&AwsService::ApiGateway) {
            metrics.apigateway = Some(ApiGatewayMetrics {
                count: gen.series(5000.0, 15000.0, Precision::Count),
                latency: gen.series(50.0, 200.0, Precision::Tenths),
                errors4xx: gen.series(10.0, 100.0, Precision::Count),
                errors5xx: gen.series(5.0, 50.0, Precision::Count),
                cache_hit_count: gen.series(100.0, 1000.0, Precision::Count),
                cache_miss_count: gen.series(50.0, 200.0, Precision::Count),
            });
        }
        metrics
    }
}

#[async_trait]
impl ServiceProvider for AwsProvider {
    fn service_type(&self) -> ServiceType {
        ServiceType::Aws
    }

    async fn metrics(
        &self,
        _credentials: &Credentials,
        options: &MetricsOptions,
    ) -> Result<ServiceMetrics, ProviderError> {
        Ok(ServiceMetrics::Aws(Self::generate(options)))
    }

    async fn status(&self, _credentials: &Credentials) -> Result<ServiceStatus, ProviderError> {
        Ok(ServiceStatus {
            status: HealthState::Warning,
            health_score: 96.3,
            trend: Trend::Down,
            change_percent: 1.5,
        })
    }
}
