//! Code for reading the scenario catalogue from a TOML file.
use super::*;
use crate::scenario::{Scenario, ScenarioMap};
use crate::train::{EffectiveStatus, Train, TrainID};
use log::warn;
use serde::Deserialize;
use std::path::Path;

const SCENARIOS_FILE_NAME: &str = "scenarios.toml";

/// Represents the contents of the entire scenarios file
#[derive(Debug, Deserialize, PartialEq)]
struct ScenariosFile {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

/// Reads the scenario catalogue from a TOML file.
///
/// The file is optional; if it is missing, the catalogue is empty.
///
/// # Arguments
///
/// * `fleet_dir` - Folder containing fleet input files
/// * `trains` - The fleet roster
///
/// # Returns
///
/// A `ScenarioMap` in file order or an error
pub fn read_scenarios(
    fleet_dir: &Path,
    trains: &IndexMap<TrainID, Train>,
) -> Result<ScenarioMap> {
    let file_path = fleet_dir.join(SCENARIOS_FILE_NAME);
    if !file_path.is_file() {
        warn!("No scenarios file provided; only ad-hoc selections can be simulated");
        return Ok(ScenarioMap::new());
    }

    let scenarios_file: ScenariosFile = read_toml(&file_path)?;
    read_scenarios_from_iter(scenarios_file.scenarios, trains)
        .with_context(|| input_err_msg(&file_path))
}

/// Check and collect scenarios.
///
/// Changes to trains which are not in the roster are allowed (they have no effect on a run), but
/// a warning is emitted for them, as is the case for unrecognised statuses.
fn read_scenarios_from_iter<I>(iter: I, trains: &IndexMap<TrainID, Train>) -> Result<ScenarioMap>
where
    I: IntoIterator<Item = Scenario>,
{
    let scenarios = try_collect_id_map(iter)?;
    for scenario in scenarios.values() {
        ensure!(
            !scenario.id.0.trim().is_empty(),
            "Scenario IDs cannot be empty"
        );

        for change in &scenario.changes {
            if !trains.contains_key(&change.train_id) {
                warn!(
                    "Scenario {} changes train {}, which is not in the fleet; the change will \
                    have no effect",
                    scenario.id, change.train_id
                );
            }

            if let EffectiveStatus::Unrecognised(status) = &change.new_status {
                warn!(
                    "Scenario {} gives train {} the unrecognised status \"{status}\"",
                    scenario.id, change.train_id
                );
            }
        }
    }

    Ok(scenarios)
}
