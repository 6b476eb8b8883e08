//! Metric keys and visibility toggles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Primary metric tracked on the analytics chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    /// Requests served
    Traffic,
    /// Percentage of failed requests
    ErrorRate,
    /// Mean response time in milliseconds
    ResponseTime,
    /// Percentage of successful requests
    SuccessRate,
}

impl MetricKey {
    /// Every primary metric, in chart legend order
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Traffic,
        MetricKey::ErrorRate,
        MetricKey::ResponseTime,
        MetricKey::SuccessRate,
    ];

    /// Series key as used by the chart
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Traffic => "traffic",
            MetricKey::ErrorRate => "errorRate",
            MetricKey::ResponseTime => "responseTime",
            MetricKey::SuccessRate => "successRate",
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Traffic => "Traffic",
            MetricKey::ErrorRate => "Error Rate",
            MetricKey::ResponseTime => "Response Time",
            MetricKey::SuccessRate => "Success Rate",
        }
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKey::Traffic => "req",
            MetricKey::ErrorRate | MetricKey::SuccessRate => "%",
            MetricKey::ResponseTime => "ms",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-'], "");
        match key.as_str() {
            "traffic" => Ok(MetricKey::Traffic),
            "errorrate" | "errors" => Ok(MetricKey::ErrorRate),
            "responsetime" | "latency" => Ok(MetricKey::ResponseTime),
            "successrate" => Ok(MetricKey::SuccessRate),
            _ => Err(AnalyticsError::UnknownMetric(s.to_string())),
        }
    }
}

/// Which metrics the chart currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricToggles {
    pub traffic: bool,
    pub error_rate: bool,
    pub response_time: bool,
    pub success_rate: bool,
}

impl MetricToggles {
    /// Only the given metrics enabled
    pub fn only(keys: &[MetricKey]) -> Self {
        let mut toggles = Self {
            traffic: false,
            error_rate: false,
            response_time: false,
            success_rate: false,
        };
        for key in keys {
            toggles.set(*key, true);
        }
        toggles
    }

    /// Whether `key` is shown
    pub fn is_enabled(&self, key: MetricKey) -> bool {
        match key {
            MetricKey::Traffic => self.traffic,
            MetricKey::ErrorRate => self.error_rate,
            MetricKey::ResponseTime => self.response_time,
            MetricKey::SuccessRate => self.success_rate,
        }
    }

    /// Show or hide `key`
    pub fn set(&mut self, key: MetricKey, enabled: bool) {
        match key {
            MetricKey::Traffic => self.traffic = enabled,
            MetricKey::ErrorRate => self.error_rate = enabled,
            MetricKey::ResponseTime => self.response_time = enabled,
            MetricKey::SuccessRate => self.success_rate = enabled,
        }
    }

    /// Flip `key` and return its new state
    pub fn toggle(&mut self, key: MetricKey) -> bool {
        let enabled = !self.is_enabled(key);
        self.set(key, enabled);
        enabled
    }

    /// Enabled metrics in legend order
    pub fn enabled(&self) -> Vec<MetricKey> {
        MetricKey::ALL
            .into_iter()
            .filter(|key| self.is_enabled(*key))
            .collect()
    }
}

impl Default for MetricToggles {
    fn default() -> Self {
        Self {
            traffic: true,
            error_rate: true,
            response_time: true,
            success_rate: true,
        }
    }
}
