//! The closed set of third-party services a project can integrate with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A supported third-party service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Authentication.
    Stytch,
    /// Push notifications.
    OneSignal,
    /// Cloud infrastructure.
    Aws,
    /// In-app chat.
    Sendbird,
    /// SMS.
    Twilio,
    /// Product analytics.
    Mixpanel,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Stytch,
        ServiceType::OneSignal,
        ServiceType::Aws,
        ServiceType::Sendbird,
        ServiceType::Twilio,
        ServiceType::Mixpanel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Stytch => "stytch",
            ServiceType::OneSignal => "onesignal",
            ServiceType::Aws => "aws",
            ServiceType::Sendbird => "sendbird",
            ServiceType::Twilio => "twilio",
            ServiceType::Mixpanel => "mixpanel",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnsupportedServiceType(s.to_string()))
    }
}

impl TryFrom<String> for ServiceType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
