//! Product analytics metrics (Mixpanel).

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::credentials::Credentials;
use crate::service_type::ServiceType;

use super::series::{Precision, SeriesGenerator, TimeSeries};
use super::{
    HealthState, MetricsOptions, ProviderError, ServiceMetrics, ServiceProvider, ServiceStatus,
    Trend,
};

/// Events reported when the caller does not name any.
pub const DEFAULT_EVENTS: [&str; 3] = ["pageView", "signup", "purchase"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixpanelMetrics {
    pub active_users: ActiveUsers,
    pub retention: Retention,
    pub events: BTreeMap<String, EventSeries>,
    pub funnels: Funnels,
    pub sessions: Sessions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveUsers {
    pub daily: TimeSeries,
    pub weekly: TimeSeries,
    pub monthly: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
pub struct Retention {
    pub day1: TimeSeries,
    pub day7: TimeSeries,
    pub day30: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSeries {
    pub count: TimeSeries,
    pub unique_users: TimeSeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub step: &'static str,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Funnels {
    pub signup: Vec<FunnelStep>,
    pub purchase: Vec<FunnelStep>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sessions {
    /// Seconds.
    pub average_duration: TimeSeries,
    pub bounce_rate: TimeSeries,
    pub pages_per_session: TimeSeries,
}

fn funnel(steps: [(&'static str, f64); 4]) -> Vec<FunnelStep> {
    steps
        .into_iter()
        .map(|(step, conversion_rate)| FunnelStep {
            step,
            conversion_rate,
        })
        .collect()
}

pub struct MixpanelProvider;

impl MixpanelProvider {
    fn generate(options: &MetricsOptions) -> MixpanelMetrics {
        let mut gen = SeriesGenerator::new(options);

        let active_users = ActiveUsers {
            daily: gen.series(1000.0, 3000.0, Precision::Count),
            weekly: gen.series(5000.0, 10000.0, Precision::Count),
            monthly: gen.series(15000.0, 25000.0, Precision::Count),
        };
        let retention = Retention {
            day1: gen.series(0.5, 0.7, Precision::Ratio),
            day7: gen.series(0.3, 0.5, Precision::Ratio),
            day30: gen.series(0.2, 0.3, Precision::Ratio),
        };

        let names: Vec<String> = match &options.events {
            Some(events) => events.clone(),
            None => DEFAULT_EVENTS.iter().map(|e| e.to_string()).collect(),
        };
        let events = names
            .into_iter()
            .map(|name| {
                let series = EventSeries {
                    count: gen.series(500.0, 5000.0, Precision::Count),
                    unique_users: gen.series(300.0, 3000.0, Precision::Count),
                };
                (name, series)
            })
            .collect();

        let funnels = Funnels {
            signup: funnel([
                ("Visit Homepage", 1.0),
                ("View Signup Form", 0.4),
                ("Start Signup", 0.25),
                ("Complete Signup", 0.15),
            ]),
            purchase: funnel([
                ("View Product", 1.0),
                ("Add to Cart", 0.3),
                ("Begin Checkout", 0.2),
                ("Complete Purchase", 0.1),
            ]),
        };

        let sessions = Sessions {
            average_duration: gen.series(120.0, 300.0, Precision::Tenths),
            bounce_rate: gen.series(0.3, 0.5, Precision::Ratio),
            pages_per_session: gen.series(2.0, 6.0, Precision::Tenths),
        };

        MixpanelMetrics {
            active_users,
            retention,
            events,
            funnels,
            sessions,
        }
    }
}

#[async_trait]
impl ServiceProvider for MixpanelProvider {
    fn service_type(&self) -> ServiceType {
        ServiceType::Mixpanel
    }

    async fn metrics(
        &self,
        _credentials: &Credentials,
        options: &MetricsOptions,
    ) -> Result<ServiceMetrics, ProviderError> {
        Ok(ServiceMetrics::Mixpanel(Self::generate(options)))
    }

    async fn status(&self, _credentials: &Credentials) -> Result<ServiceStatus, ProviderError> {
        Ok(ServiceStatus {
            status: HealthState::Healthy,
            health_score: 99.9,
            trend: Trend::Up,
            change_percent: 0.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_events_are_reported() {
        let metrics = MixpanelProvider::generate(&MetricsOptions {
            seed: Some(11),
            ..Default::default()
        });
        let names: Vec<&str> = metrics.events.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["pageView", "purchase", "signup"]);
    }

    #[test]
    fn requested_events_replace_defaults() {
        let metrics = MixpanelProvider::generate(&MetricsOptions {
            seed: Some(11),
            events: Some(vec!["checkout".into()]),
            ..Default::default()
        });
        assert_eq!(metrics.events.len(), 1);
        assert_eq!(metrics.events["checkout"].count.len(), 8);
        assert_eq!(metrics.funnels.signup.len(), 4);
    }
}
