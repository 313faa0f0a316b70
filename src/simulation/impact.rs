//! Comparison of a simulated run against the baseline.
use super::SimulationResult;
use serde::Serialize;

/// The change in one metric between the baseline and a simulated run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MetricDelta {
    /// Value in the baseline run
    pub baseline: i64,
    /// Value in the simulated run
    pub current: i64,
    /// Simulated value minus baseline value
    pub change: i64,
    /// Whether the simulated value is no worse than the baseline
    pub improved: bool,
}

impl MetricDelta {
    /// Delta for a metric where a larger value is better
    fn higher_is_better(baseline: i64, current: i64) -> Self {
        Self {
            baseline,
            current,
            change: current - baseline,
            improved: current >= baseline,
        }
    }

    /// Delta for a metric where a smaller value is better
    fn lower_is_better(baseline: i64, current: i64) -> Self {
        Self {
            baseline,
            current,
            change: current - baseline,
            improved: current <= baseline,
        }
    }
}

/// How a simulated run differs from the baseline for each headline metric
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImpactAnalysis {
    /// Change in fleet readiness (percentage points)
    pub fleet_readiness: MetricDelta,
    /// Change in service capacity (percentage points)
    pub service_capacity: MetricDelta,
    /// Change in the number of trains awaiting maintenance
    pub maintenance_backlog: MetricDelta,
    /// Change in energy efficiency (percentage points)
    pub energy_efficiency: MetricDelta,
}

impl ImpactAnalysis {
    /// Compare `current` against `baseline`
    pub fn new(baseline: &SimulationResult, current: &SimulationResult) -> Self {
        let backlog = |result: &SimulationResult| {
            i64::try_from(result.maintenance_backlog).unwrap_or(i64::MAX)
        };

        Self {
            fleet_readiness: MetricDelta::higher_is_better(
                baseline.fleet_readiness.into(),
                current.fleet_readiness.into(),
            ),
            service_capacity: MetricDelta::higher_is_better(
                baseline.service_capacity.into(),
                current.service_capacity.into(),
            ),
            maintenance_backlog: MetricDelta::lower_is_better(backlog(baseline), backlog(current)),
            energy_efficiency: MetricDelta::higher_is_better(
                baseline.energy_efficiency.into(),
                current.energy_efficiency.into(),
            ),
        }
    }

    /// Whether the simulated run is no worse than the baseline on every metric
    pub fn no_regressions(&self) -> bool {
        self.iter().all(|(_, delta)| delta.improved)
    }

    /// Iterate over the metric deltas along with the metrics' names
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MetricDelta)> {
        [
            ("fleet_readiness", &self.fleet_readiness),
            ("service_capacity", &self.service_capacity),
            ("maintenance_backlog", &self.maintenance_backlog),
            ("energy_efficiency", &self.energy_efficiency),
        ]
        .into_iter()
    }
}
