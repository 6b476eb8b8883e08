//! Chart periods

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Time window selected on the analytics chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartPeriod {
    /// Last 7 days, one point per day
    #[serde(rename = "7d")]
    SevenDays,
    /// Last 30 days, one point per day
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    /// Last 90 days, one point per day
    #[serde(rename = "90d")]
    NinetyDays,
    /// Last 12 months, one point per month
    #[serde(rename = "1y")]
    OneYear,
}

impl ChartPeriod {
    /// Every period, in selector order
    pub const ALL: [ChartPeriod; 4] = [
        ChartPeriod::SevenDays,
        ChartPeriod::ThirtyDays,
        ChartPeriod::NinetyDays,
        ChartPeriod::OneYear,
    ];

    /// Number of points a series for this period holds
    pub fn point_count(&self) -> usize {
        match self {
            ChartPeriod::SevenDays => 7,
            ChartPeriod::ThirtyDays => 30,
            ChartPeriod::NinetyDays => 90,
            ChartPeriod::OneYear => 12,
        }
    }

    /// Selector key
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::SevenDays => "7d",
            ChartPeriod::ThirtyDays => "30d",
            ChartPeriod::NinetyDays => "90d",
            ChartPeriod::OneYear => "1y",
        }
    }

    /// Whether points are months rather than days
    pub fn is_monthly(&self) -> bool {
        matches!(self, ChartPeriod::OneYear)
    }

    /// X-axis labels for a window ending on `end` (inclusive), oldest first
    pub fn labels(&self, end: NaiveDate) -> Vec<String> {
        let count = self.point_count() as u64;
        match self {
            ChartPeriod::SevenDays => (0..count)
                .rev()
                .filter_map(|back| end.checked_sub_days(Days::new(back)))
                .map(|day| day.format("%a").to_string())
                .collect(),
            ChartPeriod::ThirtyDays | ChartPeriod::NinetyDays => (0..count)
                .rev()
                .filter_map(|back| end.checked_sub_days(Days::new(back)))
                .map(|day| day.format("%b %d").to_string())
                .collect(),
            ChartPeriod::OneYear => {
                let first_of_month = end.with_day(1).unwrap_or(end);
                (0..count as u32)
                    .rev()
                    .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
                    .map(|month| month.format("%b").to_string())
                    .collect()
            }
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartPeriod {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(ChartPeriod::SevenDays),
            "30d" => Ok(ChartPeriod::ThirtyDays),
            "90d" => Ok(ChartPeriod::NinetyDays),
            "1y" | "12m" => Ok(ChartPeriod::OneYear),
            _ => Err(AnalyticsError::UnknownPeriod(s.to_string())),
        }
    }
}
