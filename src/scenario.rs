//! Scenarios and other sources of status overrides for a simulation run.
use crate::id::{define_id_getter, define_id_type};
use crate::train::{EffectiveStatus, TrainID};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

define_id_type! {ScenarioID}

/// A map of [`Scenario`]s, keyed by scenario ID, in catalogue order
pub type ScenarioMap = IndexMap<ScenarioID, Scenario>;

/// Effective statuses which replace trains' baseline statuses for a single run
pub type StatusOverrideMap = HashMap<TrainID, EffectiveStatus>;

/// A change to a single train's status made by a scenario
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StatusChange {
    /// The train whose status is changed
    pub train_id: TrainID,
    /// The status the train has while the scenario is active
    pub new_status: EffectiveStatus,
    /// Why the status changes
    pub reason: String,
}

/// A named set of status changes, used to test how the fleet copes with a given situation
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Scenario {
    /// A unique identifier for the scenario (e.g. "maintenance_surge")
    pub id: ScenarioID,
    /// Short human-readable name
    pub name: String,
    /// Longer description of the situation being modelled
    pub description: String,
    /// The status changes the scenario makes
    #[serde(default)]
    pub changes: Vec<StatusChange>,
}
define_id_getter! {Scenario, ScenarioID}

impl Scenario {
    /// Iterate over the scenario's status changes, in the order they are applied
    pub fn iter_changes(&self) -> impl Iterator<Item = &StatusChange> {
        self.changes.iter()
    }
}

/// Where the status overrides for a simulation run come from.
///
/// Only one source can be active for a given run.
#[derive(Clone, Copy, Debug)]
pub enum OverrideSource<'a> {
    /// No overrides: every train keeps its baseline status
    Baseline,
    /// The changes made by a named scenario
    Scenario(&'a Scenario),
    /// An ad-hoc selection of trains, all withdrawn for branding
    Selection(&'a [TrainID]),
}

impl OverrideSource<'_> {
    /// Build the override map for this source.
    ///
    /// If a scenario changes the same train more than once, the last change wins.
    pub fn to_override_map(&self) -> StatusOverrideMap {
        match self {
            Self::Baseline => StatusOverrideMap::new(),
            Self::Scenario(scenario) => scenario
                .iter_changes()
                .map(|change| (change.train_id.clone(), change.new_status.clone()))
                .collect(),
            Self::Selection(train_ids) => train_ids
                .iter()
                .map(|id| (id.clone(), EffectiveStatus::BrandingUnavailable))
                .collect(),
        }
    }

    /// An owned record of this source, for reporting which source was used last
    pub fn to_active(&self) -> Option<ActiveSource> {
        match self {
            Self::Baseline => None,
            Self::Scenario(scenario) => Some(ActiveSource::Scenario {
                id: scenario.id.clone(),
                name: scenario.name.clone(),
            }),
            Self::Selection(train_ids) => Some(ActiveSource::Selection {
                train_ids: train_ids.to_vec(),
            }),
        }
    }
}

/// The override source used for the most recent simulation run
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveSource {
    /// A named scenario
    Scenario {
        /// The scenario's ID
        id: ScenarioID,
        /// The scenario's name
        name: String,
    },
    /// An ad-hoc selection of trains
    Selection {
        /// The selected trains
        train_ids: Vec<TrainID>,
    },
}

impl fmt::Display for ActiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario { id, name } => write!(f, "scenario {id} ({name})"),
            Self::Selection { train_ids } => write!(
                f,
                "selection of {} train(s): {}",
                train_ids.len(),
                train_ids.iter().join(", ")
            ),
        }
    }
}
