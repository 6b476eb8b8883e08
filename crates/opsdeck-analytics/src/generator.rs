//! Synthetic metric series generation
//!
//! Only the shape of a series is contractual: its length matches the period,
//! values are non-negative, rates stay within `[0, 100]`, and each period has
//! its own recognisable pattern. Exact values depend on the [`RandomSource`].

use std::f64::consts::PI;

use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalyticsResult;
use crate::metrics::MetricKey;
use crate::period::ChartPeriod;
use crate::random::RandomSource;
use crate::rollup::{compute_rollups, Rollups};

/// Daily request volume around which day-granular series oscillate
pub const DAILY_BASE_TRAFFIC: f64 = 12_000.0;

/// Monthly request volume for the yearly series
pub const MONTHLY_BASE_TRAFFIC: f64 = 360_000.0;

/// Comparison baseline volume relative to the current period
const COMPARISON_SCALE: f64 = 0.85;

/// Weekend dip on the 7-day chart
const WEEKEND_FACTOR: f64 = 0.65;

/// One generation of every metric series for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    pub period: ChartPeriod,
    pub labels: Vec<String>,
    pub traffic: Vec<f64>,
    pub error_rate: Vec<f64>,
    pub response_time: Vec<f64>,
    pub success_rate: Vec<f64>,
    /// Previous-period traffic used as the comparison baseline
    pub comparison: Vec<f64>,
}

impl MetricSeries {
    /// Number of points in every series
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series holds no points
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Values of the series for `key`
    pub fn series(&self, key: MetricKey) -> &[f64] {
        match key {
            MetricKey::Traffic => &self.traffic,
            MetricKey::ErrorRate => &self.error_rate,
            MetricKey::ResponseTime => &self.response_time,
            MetricKey::SuccessRate => &self.success_rate,
        }
    }

    /// Mean of the series for `key`, zero when empty
    pub fn average(&self, key: MetricKey) -> f64 {
        mean(self.series(key))
    }
}

/// Series plus the rollup cards derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub series: MetricSeries,
    pub rollups: Rollups,
}

/// Generates [`MetricSeries`] for windows ending on a fixed day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSeriesGenerator {
    end: NaiveDate,
}

impl MetricSeriesGenerator {
    /// Generator for windows ending on `end` (inclusive)
    pub fn new(end: NaiveDate) -> Self {
        Self { end }
    }

    /// Last day covered by generated windows
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Generate every series for `period`
    ///
    /// Each point draws five values from `rng` in a fixed order (traffic,
    /// error rate, response time, success rate, comparison), so a seeded source
    /// reproduces the same series.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        period: ChartPeriod,
        rng: &mut R,
    ) -> MetricSeries {
        let labels = period.labels(self.end);
        let count = labels.len();
        let base = if period.is_monthly() {
            MONTHLY_BASE_TRAFFIC
        } else {
            DAILY_BASE_TRAFFIC
        };

        let mut series = MetricSeries {
            period,
            labels,
            traffic: Vec::with_capacity(count),
            error_rate: Vec::with_capacity(count),
            response_time: Vec::with_capacity(count),
            success_rate: Vec::with_capacity(count),
            comparison: Vec::with_capacity(count),
        };

        for index in 0..count {
            let shape = self.shape(period, index, count);

            let traffic = (base * shape * jitter(rng.next_unit())).round().max(0.0);
            let error_rate = round2((0.4 + 2.6 * rng.next_unit()).clamp(0.0, 100.0));
            let response_time = (120.0 + 80.0 * shape + 40.0 * rng.next_unit())
                .round()
                .max(0.0);
            let success_rate =
                round2((100.0 - error_rate - 0.5 * rng.next_unit()).clamp(0.0, 100.0));
            let comparison = (base * shape * COMPARISON_SCALE * jitter(rng.next_unit()))
                .round()
                .max(0.0);

            series.traffic.push(traffic);
            series.error_rate.push(error_rate);
            series.response_time.push(response_time);
            series.success_rate.push(success_rate);
            series.comparison.push(comparison);
        }

        debug!(period = %period, points = count, "Generated metric series");
        series
    }

    /// Generate series for `period` and derive rollups from traffic
    pub fn snapshot<R: RandomSource + ?Sized>(
        &self,
        period: ChartPeriod,
        rng: &mut R,
    ) -> AnalyticsResult<AnalyticsSnapshot> {
        let series = self.generate(period, rng);
        let rollups = compute_rollups(&series.traffic, &series.comparison)?;
        Ok(AnalyticsSnapshot { series, rollups })
    }

    fn shape(&self, period: ChartPeriod, index: usize, count: usize) -> f64 {
        let i = index as f64;
        match period {
            ChartPeriod::SevenDays => {
                let back = (count - 1 - index) as u64;
                match self.end.checked_sub_days(Days::new(back)) {
                    Some(day) if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) => {
                        WEEKEND_FACTOR
                    }
                    _ => 1.0,
                }
            }
            ChartPeriod::ThirtyDays => 1.0 + 0.15 * (2.0 * PI * i / 7.0).sin() + 0.01 * i,
            ChartPeriod::NinetyDays => {
                1.0 + 0.2 * (2.0 * PI * i / 30.0).sin()
                    + 0.05 * (2.0 * PI * i / 7.0).sin()
                    + 0.004 * i
            }
            ChartPeriod::OneYear => 1.0 + 0.25 * (2.0 * PI * i / 12.0).sin() + 0.02 * i,
        }
    }
}

impl Default for MetricSeriesGenerator {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// Multiplier in `[0.9, 1.1)` for a unit draw
fn jitter(unit: f64) -> f64 {
    1.0 + 0.2 * (unit - 0.5)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantRandom, SeededRandom};

    fn generator() -> MetricSeriesGenerator {
        // Tuesday
        MetricSeriesGenerator::new(NaiveDate::from_ymd_opt(2023, 10, 24).unwrap())
    }

    #[test]
    fn test_series_lengths_match_period() {
        let mut rng = SeededRandom::new(7);
        for period in ChartPeriod::ALL {
            let series = generator().generate(period, &mut rng);
            assert_eq!(series.len(), period.point_count());
            for key in MetricKey::ALL {
                assert_eq!(series.series(key).len(), period.point_count());
            }
            assert_eq!(series.comparison.len(), period.point_count());
        }
    }

    #[test]
    fn test_weekend_dip_on_seven_day_chart() {
        let mut rng = ConstantRandom::new(0.5);
        let series = generator().generate(ChartPeriod::SevenDays, &mut rng);

        // Wed Thu Fri Sat Sun Mon Tue
        assert_eq!(series.traffic[0], DAILY_BASE_TRAFFIC);
        assert_eq!(series.traffic[3], (DAILY_BASE_TRAFFIC * WEEKEND_FACTOR).round());
        assert_eq!(series.traffic[4], series.traffic[3]);
        assert!(series.traffic[5] > series.traffic[4]);
    }

    #[test]
    fn test_rates_are_bounded() {
        for value in [0.0, 0.5, 0.999] {
            let mut rng = ConstantRandom::new(value);
            let series = generator().generate(ChartPeriod::NinetyDays, &mut rng);
            for (error, success) in series.error_rate.iter().zip(&series.success_rate) {
                assert!((0.0..=100.0).contains(error));
                assert!((0.0..=100.0).contains(success));
            }
        }
    }

    #[test]
    fn test_yearly_uses_monthly_base() {
        let mut rng = ConstantRandom::new(0.5);
        let series = generator().generate(ChartPeriod::OneYear, &mut rng);

        assert_eq!(series.traffic[0], MONTHLY_BASE_TRAFFIC);
        assert!(series.traffic.iter().all(|v| *v > DAILY_BASE_TRAFFIC));
    }

    #[test]
    fn test_comparison_is_scaled_down() {
        let mut rng = ConstantRandom::new(0.5);
        let series = generator().generate(ChartPeriod::ThirtyDays, &mut rng);

        for (traffic, comparison) in series.traffic.iter().zip(&series.comparison) {
            assert!(comparison < traffic);
        }
    }

    #[test]
    fn test_same_seed_same_snapshot() {
        let a = generator()
            .snapshot(ChartPeriod::ThirtyDays, &mut SeededRandom::new(99))
            .unwrap();
        let b = generator()
            .snapshot(ChartPeriod::ThirtyDays, &mut SeededRandom::new(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_average_of_series() {
        let mut rng = ConstantRandom::new(0.0);
        let series = generator().generate(ChartPeriod::SevenDays, &mut rng);
        assert!((series.average(MetricKey::ErrorRate) - 0.4).abs() < 1e-9);
    }
}
