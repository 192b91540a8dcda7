//! Per-template execution metrics.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one template, updated whenever an execution
/// of that template completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowMetrics {
    /// Number of completed executions recorded.
    pub total_executions: u64,
    /// Running mean of completion time in milliseconds.
    pub average_completion_ms: f64,
    /// Running success rate in `[0, 1]`. Only completions are ever
    /// recorded, so this stays at 1.0 today; abandoned runs are never
    /// counted.
    pub success_rate: f64,
    /// Step ids ranked by usage. Reserved; not yet populated.
    #[serde(default)]
    pub popular_steps: Vec<String>,
    /// Mean user satisfaction score, when surveys are wired up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_satisfaction: Option<f64>,
}

impl WorkflowMetrics {
    /// Fold one finished execution into the running aggregates.
    ///
    /// Uses the standard running-mean update; the first recorded
    /// execution (old total 0) yields `average == completion_ms`.
    pub fn record(&mut self, completion_ms: f64, succeeded: bool) {
        let old_total = self.total_executions as f64;
        let new_total = old_total + 1.0;

        self.average_completion_ms =
            (self.average_completion_ms * old_total + completion_ms) / new_total;
        self.success_rate =
            (self.success_rate * old_total + if succeeded { 1.0 } else { 0.0 }) / new_total;
        self.total_executions += 1;
    }
}

/// Cross-template aggregate returned when no template id is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricsSummary {
    /// Number of templates with recorded metrics.
    pub template_count: usize,
    /// Sum of per-template execution counts.
    pub total_executions: u64,
    /// Simple mean of per-template average completion times.
    pub average_completion_ms: f64,
    /// Simple mean of per-template success rates.
    pub success_rate: f64,
}

impl MetricsSummary {
    /// Aggregate a set of per-template metrics.
    ///
    /// Divisors are clamped to at least 1 so an empty store yields zeros
    /// rather than NaN.
    pub fn from_metrics<'a>(metrics: impl IntoIterator<Item = &'a WorkflowMetrics>) -> Self {
        let mut summary = Self::default();
        let mut sum_avg = 0.0;
        let mut sum_rate = 0.0;

        for m in metrics {
            summary.template_count += 1;
            summary.total_executions += m.total_executions;
            sum_avg += m.average_completion_ms;
            sum_rate += m.success_rate;
        }

        let divisor = summary.template_count.max(1) as f64;
        summary.average_completion_ms = sum_avg / divisor;
        summary.success_rate = sum_rate / divisor;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record_sets_average() {
        let mut m = WorkflowMetrics::default();
        m.record(5000.0, true);
        assert_eq!(m.total_executions, 1);
        assert!((m.average_completion_ms - 5000.0).abs() < f64::EPSILON);
        assert!((m.success_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_running_mean() {
        let mut m = WorkflowMetrics::default();
        m.record(1000.0, true);
        m.record(3000.0, true);
        assert_eq!(m.total_executions, 2);
        assert!((m.average_completion_ms - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_success_rate_mix() {
        let mut m = WorkflowMetrics::default();
        m.record(100.0, true);
        m.record(100.0, false);
        assert!((m.success_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_empty() {
        let summary = MetricsSummary::from_metrics([]);
        assert_eq!(summary.template_count, 0);
        assert_eq!(summary.total_executions, 0);
        assert!(summary.average_completion_ms.abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_aggregates() {
        let mut a = WorkflowMetrics::default();
        a.record(1000.0, true);
        let mut b = WorkflowMetrics::default();
        b.record(3000.0, true);
        b.record(3000.0, true);

        let summary = MetricsSummary::from_metrics([&a, &b]);
        assert_eq!(summary.template_count, 2);
        assert_eq!(summary.total_executions, 3);
        assert!((summary.average_completion_ms - 2000.0).abs() < 1e-9);
        assert!((summary.success_rate - 1.0).abs() < 1e-9);
    }
}
