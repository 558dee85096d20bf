//! Subscription tiers and the usage limits they impose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

/// Projects a free-tier user may own.
pub const FREE_PROJECT_LIMIT: i64 = 1;

/// Service integrations a free-tier user may have across all projects.
pub const FREE_INTEGRATION_LIMIT: i64 = 3;

/// Tokens granted when a user first becomes premium.
pub const PREMIUM_TOKEN_BONUS: i32 = 1000;

/// Persisted subscription state of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Free,
    Premium,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Free => "free",
            SubscriptionStatus::Premium => "premium",
        }
    }

    pub fn is_premium(self) -> bool {
        self == SubscriptionStatus::Premium
    }

    pub fn project_limit(self) -> Limit {
        match self {
            SubscriptionStatus::Free => Limit::Capped(FREE_PROJECT_LIMIT),
            SubscriptionStatus::Premium => Limit::Unlimited,
        }
    }

    pub fn integration_limit(self) -> Limit {
        match self {
            SubscriptionStatus::Free => Limit::Capped(FREE_INTEGRATION_LIMIT),
            SubscriptionStatus::Premium => Limit::Unlimited,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses stored status strings. `active` is an alias of `premium`; anything
/// unrecognised is rejected.
impl FromStr for SubscriptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(SubscriptionStatus::Free),
            "premium" | "active" => Ok(SubscriptionStatus::Premium),
            other => Err(CoreError::Validation(format!(
                "Invalid subscription status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for SubscriptionStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A usage cap. Serializes as a number or the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Capped(i64),
    Unlimited,
}

impl Limit {
    pub fn allows(self, current: i64) -> bool {
        match self {
            Limit::Capped(max) => current < max,
            Limit::Unlimited => true,
        }
    }

    pub fn remaining(self, current: i64) -> Limit {
        match self {
            Limit::Capped(max) => Limit::Capped((max - current).max(0)),
            Limit::Unlimited => Limit::Unlimited,
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Capped(n) => serializer.serialize_i64(*n),
            Limit::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

/// Current usage of one limited resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub current: i64,
    pub limit: Limit,
    pub remaining: Limit,
}

impl Usage {
    pub fn new(current: i64, limit: Limit) -> Self {
        Self {
            current,
            limit,
            remaining: limit.remaining(current),
        }
    }
}

/// Reject creating another project when the tier's cap is reached.
pub fn check_project_limit(status: SubscriptionStatus, current: i64) -> Result<(), CoreError> {
    if status.project_limit().allows(current) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Free plan is limited to {FREE_PROJECT_LIMIT} project. Upgrade to premium to create more projects."
        )))
    }
}

/// Reject creating another integration when the tier's cap is reached.
pub fn check_integration_limit(status: SubscriptionStatus, current: i64) -> Result<(), CoreError> {
    if status.integration_limit().allows(current) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Free plan is limited to {FREE_INTEGRATION_LIMIT} service integrations. Upgrade to premium to add more."
        )))
    }
}
