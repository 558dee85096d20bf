//! Named reporting windows for metric queries.

use serde::{Deserialize, Serialize};

/// A reporting window selectable by clients (`24h`, `7d`, `30d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    #[default]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl DateRange {
    /// Parse a client-supplied range, falling back to `7d` for anything
    /// unrecognised or absent.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("24h") => DateRange::Day,
            Some("30d") => DateRange::Month,
            _ => DateRange::Week,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::Day => "24h",
            DateRange::Week => "7d",
            DateRange::Month => "30d",
        }
    }

    /// Number of whole days covered by the window.
    pub fn days(self) -> u32 {
        match self {
            DateRange::Day => 1,
            DateRange::Week => 7,
            DateRange::Month => 30,
        }
    }

    /// Number of daily points in a series for this window (both ends included).
    pub fn point_count(self) -> usize {
        self.days() as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_defaults_to_week() {
        assert_eq!(DateRange::parse_lenient(None), DateRange::Week);
        assert_eq!(DateRange::parse_lenient(Some("90d")), DateRange::Week);
        assert_eq!(DateRange::parse_lenient(Some("24h")), DateRange::Day);
        assert_eq!(DateRange::parse_lenient(Some("30d")), DateRange::Month);
    }

    #[test]
    fn point_count_includes_both_ends() {
        assert_eq!(DateRange::Day.point_count(), 2);
        assert_eq!(DateRange::Week.point_count(), 8);
        assert_eq!(DateRange::Month.point_count(), 31);
    }
}
