//! Daily time series generation.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::date_range::DateRange;
use crate::types::Timestamp;

use super::MetricsOptions;

/// A sampled value. Whole-number series serialize as JSON integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleValue {
    Whole(i64),
    Fraction(f64),
}

impl SampleValue {
    pub fn as_f64(self) -> f64 {
        match self {
            SampleValue::Whole(v) => v as f64,
            SampleValue::Fraction(v) => v,
        }
    }
}

/// One sample in a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub timestamp: Timestamp,
    pub value: SampleValue,
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub data_points: Vec<DataPoint>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }
}

/// How a sampled value is rounded before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Rounded to the nearest whole number.
    Rounded,
    /// Truncated to a whole number.
    Count,
    /// Two decimal places, for ratios in `0..1`.
    Ratio,
    /// One decimal place.
    Tenths,
    /// Kept as sampled.
    Exact,
}

impl Precision {
    fn apply(self, value: f64) -> SampleValue {
        match self {
            Precision::Rounded => SampleValue::Whole(value.round() as i64),
            Precision::Count => SampleValue::Whole(value.floor() as i64),
            Precision::Ratio => SampleValue::Fraction((value * 100.0).round() / 100.0),
            Precision::Tenths => SampleValue::Fraction((value * 10.0).round() / 10.0),
            Precision::Exact => SampleValue::Fraction(value),
        }
    }
}

/// Produces daily series ending at a fixed anchor.
///
/// A series for a range of `N` days holds `N + 1` points, one per day from
/// `anchor - N days` through `anchor`.
pub struct SeriesGenerator {
    rng: StdRng,
    anchor: Timestamp,
    range: DateRange,
}

impl SeriesGenerator {
    pub fn new(options: &MetricsOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            anchor: options.anchor.unwrap_or_else(Utc::now),
            range: options.range,
        }
    }

    /// Sample a series with values uniformly drawn from `[min, max)`.
    pub fn series(&mut self, min: f64, max: f64, precision: Precision) -> TimeSeries {
        let days = i64::from(self.range.days());
        let data_points = (0..=days)
            .rev()
            .map(|back| {
                let timestamp = self.anchor - Duration::days(back);
                let raw = if max > min {
                    self.rng.random_range(min..max)
                } else {
                    min
                };
                DataPoint {
                    timestamp,
                    value: precision.apply(raw),
                    label: timestamp.format("%a").to_string(),
                }
            })
            .collect();
        TimeSeries { data_points }
    }
}
