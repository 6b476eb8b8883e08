//! OpsDeck Analytics
//!
//! Synthetic fleet metrics for the analytics view: per-period series with a
//! recognisable shape, a comparison baseline, and the rollup statistics shown
//! on the header cards.
//!
//! ## Features
//!
//! - **Chart Periods**: 7 days, 30 days, 90 days and 12 months, each with its own labels
//! - **Seedable Generation**: all randomness flows through [`RandomSource`]
//! - **Rollups**: total, peak, average and growth against the comparison baseline
//! - **Metric Toggles**: per-metric visibility for the chart legend
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use opsdeck_analytics::{ChartPeriod, MetricSeriesGenerator, SeededRandom};
//!
//! let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let generator = MetricSeriesGenerator::new(end);
//! let snapshot = generator
//!     .snapshot(ChartPeriod::SevenDays, &mut SeededRandom::new(42))
//!     .unwrap();
//!
//! assert_eq!(snapshot.series.traffic.len(), 7);
//! assert_eq!(snapshot.rollups.growth.trend.len(), 7);
//! ```

pub mod error;
pub mod generator;
pub mod metrics;
pub mod period;
pub mod random;
pub mod rollup;

pub use error::{AnalyticsError, AnalyticsResult};
pub use generator::{
    AnalyticsSnapshot, MetricSeries, MetricSeriesGenerator, DAILY_BASE_TRAFFIC,
    MONTHLY_BASE_TRAFFIC,
};
pub use metrics::{MetricKey, MetricToggles};
pub use period::ChartPeriod;
pub use random::{ConstantRandom, RandomSource, SeededRandom, ThreadRandom};
pub use rollup::{compute_rollups, percent_change, RollupStat, Rollups};
