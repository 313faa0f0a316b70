//! Warnings and recommendations derived from a simulation run.
//!
//! Each rule is checked independently and every rule which applies contributes one message, in
//! the order the rules are listed here.
use super::StatusCounts;

/// Fleet readiness (percent) below which a warning is given
const LOW_READINESS_THRESHOLD: u32 = 70;

/// Trains in maintenance above which a warning is given
const HIGH_BACKLOG_THRESHOLD: usize = 3;

/// Trains withdrawn for branding above which a warning is given
const MANY_UNAVAILABLE_THRESHOLD: usize = 2;

/// Trains on standby above which activating them is recommended
const STANDBY_SURPLUS_THRESHOLD: usize = 2;

/// Energy efficiency (percent) above which the current operations are commended
const HIGH_EFFICIENCY_THRESHOLD: u32 = 90;

/// Fraction of the fleet in service at or above which utilisation is considered optimal
const OPTIMAL_UTILISATION_FRACTION: f64 = 0.8;

/// Warnings about risks to service
pub fn warnings_for(counts: &StatusCounts, fleet_readiness: u32) -> Vec<String> {
    let mut warnings = Vec::new();

    if fleet_readiness < LOW_READINESS_THRESHOLD {
        warnings.push(format!(
            "Low fleet readiness ({fleet_readiness}%) - consider reducing maintenance window"
        ));
    }
    if counts.maintenance > HIGH_BACKLOG_THRESHOLD {
        warnings.push(format!(
            "High maintenance backlog ({} trains) - may impact service",
            counts.maintenance
        ));
    }
    if counts.unavailable > MANY_UNAVAILABLE_THRESHOLD {
        warnings.push(format!(
            "Multiple trains unavailable ({}) - monitor service gaps",
            counts.unavailable
        ));
    }

    warnings
}

/// Advice on running the fleet
#[allow(clippy::cast_precision_loss)]
pub fn recommendations_for(counts: &StatusCounts, energy_efficiency: u32) -> Vec<String> {
    let mut recommendations = Vec::new();

    if counts.standby > STANDBY_SURPLUS_THRESHOLD {
        recommendations
            .push("Consider activating standby trains to improve fleet readiness".to_string());
    }
    if energy_efficiency > HIGH_EFFICIENCY_THRESHOLD {
        recommendations
            .push("Excellent energy efficiency - maintain current operations".to_string());
    }
    if counts.operational as f64 >= counts.total as f64 * OPTIMAL_UTILISATION_FRACTION {
        recommendations.push("Fleet utilization optimal for current demand".to_string());
    }

    recommendations
}
