//! The fleet: the roster of trains a depot simulates, plus its scenario catalogue.
use crate::scenario::{Scenario, ScenarioMap};
use crate::train::{Train, TrainID};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::collections::HashSet;

/// A fleet as read from a fleet directory
#[derive(Debug, PartialEq)]
pub struct Fleet {
    /// The baseline roster, in file order
    pub trains: Vec<Train>,
    /// Named scenarios which can be simulated against the roster
    pub scenarios: ScenarioMap,
}

impl Fleet {
    /// Look up a scenario by ID, giving the valid options in the error if not found
    pub fn get_scenario(&self, id: &str) -> Result<&Scenario> {
        self.scenarios.get(id).with_context(|| {
            format!(
                "Unknown scenario \"{id}\". Valid options are: {}",
                self.scenarios.keys().join(", ")
            )
        })
    }

    /// The IDs in `train_ids` which don't belong to any train in the roster
    pub fn unknown_trains<'a>(&self, train_ids: &'a [TrainID]) -> Vec<&'a TrainID> {
        let roster_ids: HashSet<&str> = self.trains.iter().map(|train| &*train.id.0).collect();
        train_ids
            .iter()
            .filter(|id| !roster_ids.contains(&*id.0))
            .collect()
    }
}
