//! Functionality for running fleet "what-if" simulations.
//!
//! A simulation run takes the baseline roster and a map of status overrides, works out the
//! status each train has for the run and derives fleet-level metrics, advisories and a ranked
//! induction list from them. Runs share no state: each one is recomputed from scratch.
use crate::scenario::StatusOverrideMap;
use crate::train::{EffectiveStatus, Train};
use log::debug;
use serde::Serialize;
use thiserror::Error;

pub mod advisory;
use advisory::{recommendations_for, warnings_for};
pub mod impact;
pub use impact::ImpactAnalysis;
pub mod ranking;
pub use ranking::InductionEntry;
use ranking::rank_for_induction;
pub mod simulator;
pub use simulator::Simulator;

/// Energy efficiency of a fleet with no trains withdrawn (percent)
const BASE_ENERGY_EFFICIENCY: i64 = 95;

/// Energy efficiency never drops below this value (percent)
const MIN_ENERGY_EFFICIENCY: i64 = 60;

/// Efficiency lost for each train in maintenance or awaiting inspection (percentage points)
const MAINTENANCE_EFFICIENCY_PENALTY: i64 = 2;

/// Efficiency lost for each train withdrawn for branding (percentage points)
const UNAVAILABLE_EFFICIENCY_PENALTY: i64 = 3;

/// Errors which prevent a simulation from being run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The roster contains no trains, so fleet percentages are undefined
    #[error("The fleet roster is empty; at least one train is required to run a simulation")]
    EmptyRoster,
}

/// The number of trains in each group of effective statuses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Number of trains in the roster
    pub total: usize,
    /// Trains cleared for service
    pub operational: usize,
    /// Trains in maintenance or awaiting inspection
    pub maintenance: usize,
    /// Trains on standby
    pub standby: usize,
    /// Trains withdrawn for branding
    pub unavailable: usize,
    /// Trains whose override status was not recognised
    pub unrecognised: usize,
}

impl StatusCounts {
    /// Count the trains with each effective status
    fn from_statuses<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a EffectiveStatus>,
    {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                EffectiveStatus::GoForService => counts.operational += 1,
                EffectiveStatus::MaintenanceRequired | EffectiveStatus::InspectionRequired => {
                    counts.maintenance += 1;
                }
                EffectiveStatus::Standby => counts.standby += 1,
                EffectiveStatus::BrandingUnavailable => counts.unavailable += 1,
                EffectiveStatus::Unrecognised(_) => counts.unrecognised += 1,
            }
        }

        counts
    }
}

/// The outcome of a simulation run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Percentage of the fleet able to enter revenue service
    pub fleet_readiness: u32,
    /// Percentage of the fleet either in service or available on standby
    pub service_capacity: u32,
    /// Number of trains requiring maintenance or inspection
    pub maintenance_backlog: usize,
    /// Estimated fleet energy efficiency (percent)
    pub energy_efficiency: u32,
    /// Advice on how the fleet could be run better
    pub recommendations: Vec<String>,
    /// Risks to service arising from the fleet's state
    pub warnings: Vec<String>,
    /// Trains recommended for dispatch into service, in priority order
    pub ranked_induction_list: Vec<InductionEntry>,
    /// Number of trains with each effective status
    pub counts: StatusCounts,
}

/// The status a train has for a run: its override if there is one, else its baseline status
pub fn effective_status(train: &Train, overrides: &StatusOverrideMap) -> EffectiveStatus {
    overrides
        .get(&train.id)
        .cloned()
        .unwrap_or_else(|| train.status.into())
}

/// Round a fraction of the fleet to a whole percentage
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn percentage(count: usize, total: usize) -> u32 {
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Estimated energy efficiency, given the number of trains withdrawn from service
fn energy_efficiency(maintenance: usize, unavailable: usize) -> u32 {
    let penalty = |count: usize, per_train: i64| {
        i64::try_from(count)
            .unwrap_or(i64::MAX)
            .saturating_mul(per_train)
    };
    let efficiency = BASE_ENERGY_EFFICIENCY
        .saturating_sub(penalty(maintenance, MAINTENANCE_EFFICIENCY_PENALTY))
        .saturating_sub(penalty(unavailable, UNAVAILABLE_EFFICIENCY_PENALTY))
        .max(MIN_ENERGY_EFFICIENCY);

    // Always between the minimum and the base value, so fits in a u32
    u32::try_from(efficiency).unwrap_or(0)
}

/// Compute the outcome of a simulation run.
///
/// This is a pure function of its inputs: the roster is not modified and identical inputs always
/// give identical results. Overrides for trains which are not in the roster are ignored.
///
/// # Arguments
///
/// * `roster` - The baseline fleet roster
/// * `overrides` - Statuses which replace trains' baseline statuses for this run
///
/// # Returns
///
/// The [`SimulationResult`], or an error if the roster is empty.
pub fn compute_result(
    roster: &[Train],
    overrides: &StatusOverrideMap,
) -> Result<SimulationResult, SimulationError> {
    if roster.is_empty() {
        return Err(SimulationError::EmptyRoster);
    }

    let ignored = overrides
        .keys()
        .filter(|id| !roster.iter().any(|train| train.id == **id))
        .count();
    if ignored > 0 {
        debug!("Ignoring {ignored} override(s) for trains not in the roster");
    }

    let statuses: Vec<_> = roster
        .iter()
        .map(|train| effective_status(train, overrides))
        .collect();
    let counts = StatusCounts::from_statuses(&statuses);

    let fleet_readiness = percentage(counts.operational, counts.total);
    let service_capacity = percentage(counts.operational + counts.standby, counts.total);
    let energy_efficiency = energy_efficiency(counts.maintenance, counts.unavailable);

    let operational = roster
        .iter()
        .zip(&statuses)
        .filter(|(_, status)| **status == EffectiveStatus::GoForService)
        .map(|(train, _)| train);
    let ranked_induction_list = rank_for_induction(operational);

    Ok(SimulationResult {
        fleet_readiness,
        service_capacity,
        maintenance_backlog: counts.maintenance,
        energy_efficiency,
        recommendations: recommendations_for(&counts, energy_efficiency),
        warnings: warnings_for(&counts, fleet_readiness),
        ranked_induction_list,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{maintenance_surge, metro_trains, mixed_trains, train};
    use crate::scenario::{OverrideSource, Scenario};
    use crate::train::TrainStatus;
    use itertools::Itertools;
    use map_macro::hash_map;
    use rstest::rstest;

    #[rstest]
    fn test_compute_result_baseline(metro_trains: Vec<Train>) {
        let result = compute_result(&metro_trains, &StatusOverrideMap::new()).unwrap();
        assert_eq!(
            result.counts,
            StatusCounts {
                total: 5,
                operational: 3,
                maintenance: 1,
                standby: 1,
                unavailable: 0,
                unrecognised: 0,
            }
        );
        assert_eq!(result.fleet_readiness, 60);
        assert_eq!(result.service_capacity, 80);
        assert_eq!(result.maintenance_backlog, 1);
        assert_eq!(result.energy_efficiency, 93);
        assert_eq!(
            result.warnings,
            ["Low fleet readiness (60%) - consider reducing maintenance window"]
        );
        assert_eq!(
            result.recommendations,
            ["Excellent energy efficiency - maintain current operations"]
        );
        assert_eq!(
            result
                .ranked_induction_list
                .iter()
                .map(|entry| entry.train_id.to_string())
                .collect_vec(),
            ["TRN-001", "TRN-005", "TRN-003"]
        );
    }

    #[rstest]
    fn test_compute_result_branding_selection(mixed_trains: Vec<Train>) {
        // TRN-002 and TRN-004 withdrawn for branding, leaving two trains in service
        let overrides = hash_map! {
            "TRN-002".into() => EffectiveStatus::BrandingUnavailable,
            "TRN-004".into() => EffectiveStatus::BrandingUnavailable,
        };
        let result = compute_result(&mixed_trains, &overrides).unwrap();
        assert_eq!(result.counts.operational, 2);
        assert_eq!(result.counts.unavailable, 2);
        assert_eq!(result.fleet_readiness, 40);
        assert_eq!(result.service_capacity, 60);
        assert_eq!(result.maintenance_backlog, 0);
        assert_eq!(result.energy_efficiency, 89);
        assert_eq!(
            result.warnings,
            ["Low fleet readiness (40%) - consider reducing maintenance window"]
        );
        assert!(result.recommendations.is_empty());
    }

    #[rstest]
    fn test_compute_result_maintenance_surge(
        metro_trains: Vec<Train>,
        maintenance_surge: Scenario,
    ) {
        let overrides = OverrideSource::Scenario(&maintenance_surge).to_override_map();
        let result = compute_result(&metro_trains, &overrides).unwrap();
        assert_eq!(result.counts.operational, 0);
        assert_eq!(result.maintenance_backlog, 4);
        assert_eq!(result.fleet_readiness, 0);
        assert_eq!(result.service_capacity, 20);
        assert_eq!(result.energy_efficiency, 87);
        assert_eq!(
            result.warnings,
            [
                "Low fleet readiness (0%) - consider reducing maintenance window",
                "High maintenance backlog (4 trains) - may impact service",
            ]
        );
        assert!(result.ranked_induction_list.is_empty());
    }

    #[test]
    fn test_compute_result_empty_roster() {
        assert_eq!(
            compute_result(&[], &StatusOverrideMap::new()),
            Err(SimulationError::EmptyRoster)
        );
    }

    #[rstest]
    fn test_compute_result_is_pure(metro_trains: Vec<Train>, maintenance_surge: Scenario) {
        let roster_before = metro_trains.clone();
        let overrides = OverrideSource::Scenario(&maintenance_surge).to_override_map();
        let first = compute_result(&metro_trains, &overrides).unwrap();
        let second = compute_result(&metro_trains, &overrides).unwrap();
        assert_eq!(first, second);
        assert_eq!(metro_trains, roster_before);
    }

    #[rstest]
    fn test_compute_result_unknown_override_ignored(metro_trains: Vec<Train>) {
        let with_unknown = hash_map! {
            "TRN-003".into() => EffectiveStatus::Standby,
            "TRN-006".into() => EffectiveStatus::GoForService,
        };
        let without_unknown = hash_map! { "TRN-003".into() => EffectiveStatus::Standby };
        assert_eq!(
            compute_result(&metro_trains, &with_unknown).unwrap(),
            compute_result(&metro_trains, &without_unknown).unwrap()
        );
    }

    #[rstest]
    fn test_compute_result_unrecognised_status(metro_trains: Vec<Train>) {
        let overrides = hash_map! {
            "TRN-001".into() => EffectiveStatus::parse("decommissioned"),
        };
        let result = compute_result(&metro_trains, &overrides).unwrap();
        let counts = result.counts;
        assert_eq!(counts.unrecognised, 1);
        assert_eq!(
            counts.operational + counts.maintenance + counts.standby + counts.unavailable,
            counts.total - 1
        );
        assert_eq!(result.fleet_readiness, 40);
    }

    #[rstest]
    #[case(0, 0, 95)]
    #[case(1, 0, 93)]
    #[case(0, 2, 89)]
    #[case(5, 5, 70)]
    #[case(10, 10, 60)]
    #[case(usize::MAX, usize::MAX, 60)]
    fn test_energy_efficiency(
        #[case] maintenance: usize,
        #[case] unavailable: usize,
        #[case] expected: u32,
    ) {
        assert_eq!(energy_efficiency(maintenance, unavailable), expected);
    }

    #[rstest]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 8, 13)] // 12.5 rounds up
    #[case(3, 8, 38)] // 37.5 rounds up
    #[case(0, 7, 0)]
    #[case(7, 7, 100)]
    fn test_percentage(#[case] count: usize, #[case] total: usize, #[case] expected: u32) {
        assert_eq!(percentage(count, total), expected);
    }

    #[test]
    fn test_metric_bounds() {
        let statuses = [
            TrainStatus::GoForService,
            TrainStatus::Standby,
            TrainStatus::InspectionRequired,
        ];
        let overrides = [
            None,
            Some(EffectiveStatus::MaintenanceRequired),
            Some(EffectiveStatus::BrandingUnavailable),
        ];

        // Every combination of baseline status and override for a small roster
        for combo in (0..4)
            .map(|_| statuses.iter().cartesian_product(&overrides))
            .multi_cartesian_product()
        {
            let roster = combo
                .iter()
                .enumerate()
                .map(|(i, (status, _))| train(&format!("T{i}"), **status, 0.5, 1000))
                .collect_vec();
            let overrides: StatusOverrideMap = combo
                .iter()
                .enumerate()
                .filter_map(|(i, (_, status))| {
                    (*status).clone().map(|status| (format!("T{i}").into(), status))
                })
                .collect();

            let result = compute_result(&roster, &overrides).unwrap();
            assert!(result.fleet_readiness <= 100);
            assert!(result.service_capacity <= 100);
            assert!((60..=95).contains(&result.energy_efficiency));
            assert!(result.service_capacity >= result.fleet_readiness);
            assert_eq!(
                result.ranked_induction_list.len(),
                result.counts.operational.min(6)
            );
        }
    }
}
