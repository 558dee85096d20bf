//! Dashboard widget kinds and grid placement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetType {
    Chart,
    Metric,
    Status,
    AlertList,
}

impl WidgetType {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::Chart => "chart",
            WidgetType::Metric => "metric",
            WidgetType::Status => "status",
            WidgetType::AlertList => "alert-list",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(WidgetType::Chart),
            "metric" => Ok(WidgetType::Metric),
            "status" => Ok(WidgetType::Status),
            "alert-list" => Ok(WidgetType::AlertList),
            other => Err(CoreError::Validation(format!(
                "Invalid widget type '{other}'. Must be one of: chart, metric, status, alert-list"
            ))),
        }
    }
}

impl TryFrom<String> for WidgetType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Grid placement of a widget, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WidgetPosition {
    /// Reject negative coordinates and empty sizes.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.x < 0 || self.y < 0 {
            return Err(CoreError::Validation(
                "Widget position coordinates must be non-negative".into(),
            ));
        }
        if self.w <= 0 || self.h <= 0 {
            return Err(CoreError::Validation(
                "Widget width and height must be positive".into(),
            ));
        }
        Ok(())
    }
}
