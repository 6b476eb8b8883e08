//! Rollup statistics for the analytics header cards

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::generator::mean;

/// Percent change from `previous` to `current`
///
/// A zero `previous` is replaced by 1 so the result is always finite.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    let denominator = if previous == 0.0 { 1.0 } else { previous };
    (current - previous) / denominator * 100.0
}

/// Headline value with its change against the comparison period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupStat {
    pub value: f64,
    /// Percent change versus the comparison series
    pub change: f64,
    /// Sparkline values
    pub trend: Vec<f64>,
}

impl RollupStat {
    /// Whether the change is non-negative
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// The four header cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rollups {
    pub total: RollupStat,
    pub peak: RollupStat,
    pub average: RollupStat,
    pub growth: RollupStat,
}

/// Derive rollups from a primary series and its comparison baseline
///
/// * `total`: sum, change versus the comparison sum
/// * `peak`: maximum, change versus the comparison maximum
/// * `average`: rounded mean, change versus the comparison mean
/// * `growth`: value is the total's change, trend is the pointwise percent
///   delta, change is the latest pointwise delta
///
/// Both series must have the same length. Empty series produce all zeros.
pub fn compute_rollups(primary: &[f64], comparison: &[f64]) -> AnalyticsResult<Rollups> {
    if primary.len() != comparison.len() {
        return Err(AnalyticsError::LengthMismatch {
            primary: primary.len(),
            comparison: comparison.len(),
        });
    }

    if primary.is_empty() {
        return Ok(Rollups::default());
    }

    let total = primary.iter().sum::<f64>();
    let previous_total = comparison.iter().sum::<f64>();
    let total_change = percent_change(total, previous_total);

    let peak = max(primary);
    let previous_peak = max(comparison);

    let average = mean(primary);
    let previous_average = mean(comparison);

    let deltas: Vec<f64> = primary
        .iter()
        .zip(comparison)
        .map(|(current, previous)| percent_change(*current, *previous))
        .collect();

    debug!(points = primary.len(), total, peak, "Computed rollups");

    Ok(Rollups {
        total: RollupStat {
            value: total,
            change: total_change,
            trend: primary.to_vec(),
        },
        peak: RollupStat {
            value: peak,
            change: percent_change(peak, previous_peak),
            trend: primary.to_vec(),
        },
        average: RollupStat {
            value: average.round(),
            change: percent_change(average, previous_average),
            trend: primary.to_vec(),
        },
        growth: RollupStat {
            value: total_change,
            change: deltas.last().copied().unwrap_or_default(),
            trend: deltas,
        },
    })
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(110.0, 100.0), 10.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(percent_change(5.0, 0.0), 500.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_rollups_against_baseline() {
        let primary = [10.0, 20.0, 30.0];
        let comparison = [10.0, 10.0, 20.0];

        let rollups = compute_rollups(&primary, &comparison).unwrap();

        assert_eq!(rollups.total.value, 60.0);
        assert_eq!(rollups.total.change, 50.0);
        assert_eq!(rollups.peak.value, 30.0);
        assert_eq!(rollups.peak.change, 50.0);
        assert_eq!(rollups.average.value, 20.0);
        assert_eq!(rollups.average.change, 50.0);
        assert_eq!(rollups.growth.value, 50.0);
        assert_eq!(rollups.growth.trend, vec![0.0, 100.0, 50.0]);
        assert_eq!(rollups.growth.change, 50.0);
        assert_eq!(rollups.total.trend, primary.to_vec());
    }

    #[test]
    fn test_average_is_rounded() {
        let rollups = compute_rollups(&[1.0, 2.0], &[1.0, 1.0]).unwrap();
        assert_eq!(rollups.average.value, 2.0);
        assert_eq!(rollups.average.change, 50.0);
    }

    #[test]
    fn test_zero_comparison_stays_finite() {
        let rollups = compute_rollups(&[3.0, 4.0], &[0.0, 0.0]).unwrap();

        assert_eq!(rollups.total.change, 700.0);
        assert!(rollups.growth.trend.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_empty_series() {
        let rollups = compute_rollups(&[], &[]).unwrap();
        assert_eq!(rollups, Rollups::default());
    }

    #[test]
    fn test_length_mismatch() {
        let err = compute_rollups(&[1.0], &[]).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::LengthMismatch {
                primary: 1,
                comparison: 0
            }
        );
    }
}
