//! Ranking trains for induction into service.
use crate::train::{Train, TrainID, format_thousands};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The maximum number of trains in an induction list
pub const INDUCTION_LIST_LENGTH: usize = 6;

/// A train recommended for dispatch into service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InductionEntry {
    /// The recommended train
    pub train_id: TrainID,
    /// Rank in the induction list, starting at 1
    pub priority: usize,
    /// How ready the train is for service (percent)
    pub readiness: u32,
    /// Summary of the figures behind the ranking
    pub reason: String,
}

/// Compare risk scores, lowest first.
///
/// NaNs compare equal to each other and greater than any number.
fn compare_risk(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Order trains by induction priority: lowest risk first, then highest mileage first
fn compare_for_induction(a: &Train, b: &Train) -> Ordering {
    compare_risk(a.ai_risk_score, b.ai_risk_score)
        .then_with(|| b.total_mileage.cmp(&a.total_mileage))
}

/// Express a risk score as a whole percentage
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn risk_percent(ai_risk_score: f64) -> u32 {
    (ai_risk_score * 100.0).round() as u32
}

/// How ready a train is for service, as a whole percentage
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn readiness(ai_risk_score: f64) -> u32 {
    (100.0 - ai_risk_score * 100.0).round() as u32
}

/// Rank operational trains for induction into service.
///
/// Trains with lower risk scores come first. Where risk scores are equal, trains with higher
/// mileage come first, so that long-idle stock is cycled back into service. Trains which are
/// still tied keep their roster order. At most [`INDUCTION_LIST_LENGTH`] trains are returned.
///
/// # Arguments
///
/// * `trains` - Trains cleared for service, in roster order
pub fn rank_for_induction<'a, I>(trains: I) -> Vec<InductionEntry>
where
    I: IntoIterator<Item = &'a Train>,
{
    let mut candidates: Vec<_> = trains.into_iter().collect();
    candidates.sort_by(|a, b| compare_for_induction(a, b));

    candidates
        .into_iter()
        .take(INDUCTION_LIST_LENGTH)
        .enumerate()
        .map(|(idx, train)| InductionEntry {
            train_id: train.id.clone(),
            priority: idx + 1,
            readiness: readiness(train.ai_risk_score),
            reason: format!(
                "Risk: {}%, Mileage: {}km",
                risk_percent(train.ai_risk_score),
                format_thousands(train.total_mileage)
            ),
        })
        .collect()
}
