// Analytics chart data and rollup cards

use chrono::NaiveDate;
use opsdeck_analytics::{
    AnalyticsSnapshot, ChartPeriod, MetricKey, MetricSeriesGenerator, MetricToggles, RollupStat,
    SeededRandom, ThreadRandom,
};

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Generate and display synthetic metrics for a period
pub struct AnalyticsCommand {
    pub period: ChartPeriod,
    /// Fixed seed; thread-local randomness when unset
    pub seed: Option<u64>,
    pub metrics: MetricToggles,
    /// Last day of the window; today when unset
    pub end: Option<NaiveDate>,
    /// Emit the snapshot as JSON instead of tables
    pub json: bool,
}

impl AnalyticsCommand {
    pub fn new(period: ChartPeriod, seed: Option<u64>, metrics: MetricToggles) -> Self {
        Self {
            period,
            seed,
            metrics,
            end: None,
            json: false,
        }
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Generate a fresh snapshot
    pub fn snapshot(&self) -> CliResult<AnalyticsSnapshot> {
        let generator = match self.end {
            Some(end) => MetricSeriesGenerator::new(end),
            None => MetricSeriesGenerator::default(),
        };

        let snapshot = match self.seed {
            Some(seed) => generator.snapshot(self.period, &mut SeededRandom::new(seed))?,
            None => generator.snapshot(self.period, &mut ThreadRandom)?,
        };
        Ok(snapshot)
    }

    pub fn run(&self, style: &OutputStyle) -> CliResult<String> {
        let snapshot = self.snapshot()?;
        if self.json {
            return serde_json::to_string_pretty(&snapshot)
                .map_err(|e| crate::error::CliError::Internal(e.to_string()));
        }
        Ok(render_snapshot(&snapshot, &self.metrics, style))
    }
}

#[async_trait::async_trait]
impl Command for AnalyticsCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.run(&OutputStyle::default())?);
        Ok(())
    }
}

/// Rollup cards followed by one row per point for every enabled metric
pub fn render_snapshot(
    snapshot: &AnalyticsSnapshot,
    metrics: &MetricToggles,
    style: &OutputStyle,
) -> String {
    let rollups = &snapshot.rollups;
    let mut lines = vec![style.header(&format!(
        "Analytics ({} points, {})",
        snapshot.series.len(),
        snapshot.series.period
    ))];

    let card = |label: &str, stat: &RollupStat, value: String| {
        style.key_value(label, &format!("{} ({})", value, style.change(stat.change)))
    };
    lines.push(card(
        "Total requests",
        &rollups.total,
        format!("{:.0}", rollups.total.value),
    ));
    lines.push(card(
        "Peak",
        &rollups.peak,
        format!("{:.0}", rollups.peak.value),
    ));
    lines.push(card(
        "Average",
        &rollups.average,
        format!("{:.0}", rollups.average.value),
    ));
    lines.push(style.key_value("Growth", &style.change(rollups.growth.value)));

    let enabled = metrics.enabled();
    if enabled.is_empty() {
        lines.push(String::new());
        lines.push(style.info("All metrics are hidden"));
        return lines.join("\n");
    }

    let mut headers = vec!["Point".to_string()];
    headers.extend(
        enabled
            .iter()
            .map(|key| format!("{} ({})", key.label(), key.unit())),
    );
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let rows: Vec<Vec<String>> = snapshot
        .series
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.clone()];
            row.extend(enabled.iter().map(|key| format_value(*key, snapshot, i)));
            row
        })
        .collect();

    lines.push(style.section("Series"));
    lines.push(style.table(&header_refs, &rows));
    lines.join("\n")
}

fn format_value(key: MetricKey, snapshot: &AnalyticsSnapshot, index: usize) -> String {
    let value = snapshot.series.series(key).get(index).copied().unwrap_or(0.0);
    match key {
        MetricKey::ErrorRate | MetricKey::SuccessRate => format!("{:.2}", value),
        MetricKey::Traffic | MetricKey::ResponseTime => format!("{:.0}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(period: ChartPeriod) -> AnalyticsCommand {
        AnalyticsCommand::new(period, Some(11), MetricToggles::default())
            .with_end(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap())
    }

    #[test]
    fn test_seeded_runs_match() {
        let style = OutputStyle::plain();
        let a = command(ChartPeriod::ThirtyDays).run(&style).unwrap();
        let b = command(ChartPeriod::ThirtyDays).run(&style).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_table_has_one_row_per_point() {
        let output = command(ChartPeriod::SevenDays)
            .run(&OutputStyle::plain())
            .unwrap();

        assert!(output.contains("Analytics (7 points, 7d)"));
        assert!(output.contains("Error Rate (%)"));
        // 2024-05-31 was a Friday
        assert!(output.lines().last().unwrap().starts_with("Fri"));
    }

    #[test]
    fn test_hidden_metrics_are_omitted() {
        let mut cmd = command(ChartPeriod::OneYear);
        cmd.metrics = MetricToggles::only(&[MetricKey::Traffic]);
        let output = cmd.run(&OutputStyle::plain()).unwrap();

        assert!(output.contains("Traffic (req)"));
        assert!(!output.contains("Response Time"));
    }

    #[test]
    fn test_json_output_parses() {
        let output = command(ChartPeriod::NinetyDays)
            .with_json(true)
            .run(&OutputStyle::plain())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["series"]["traffic"].as_array().unwrap().len(), 90);
    }
}
