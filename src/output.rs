//! Writing simulation results to disk.
use crate::scenario::{ActiveSource, StatusOverrideMap};
use crate::simulation::{
    ImpactAnalysis, InductionEntry, SimulationResult, Simulator, StatusCounts, effective_status,
};
use crate::train::{EffectiveStatus, Train, TrainID, TrainStatus};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which fleet-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "fleetsim_results";

/// Headline metrics, advisories and the impact of the simulated run
const SUMMARY_FILE_NAME: &str = "summary.toml";

/// Ranked induction lists for both runs
const INDUCTION_LIST_FILE_NAME: &str = "induction_list.csv";

/// The status every train had in each run
const EFFECTIVE_STATUS_FILE_NAME: &str = "debug_effective_status.csv";

/// Get the default output folder for the fleet in `fleet_dir`
pub fn get_output_dir(fleet_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let fleet_dir = fleet_dir
        .canonicalize()
        .context("Could not resolve path to fleet")?;

    let fleet_name = fleet_dir
        .file_name()
        .context("Fleet cannot be in root folder")?
        .to_str()
        .context("Invalid chars in fleet dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, fleet_name].iter().collect())
}

/// Create the output folder, if it doesn't already exist.
///
/// A folder which already contains files is only reused if `allow_overwrite` is set, in which
/// case its contents are deleted.
///
/// # Returns
///
/// Whether an existing folder's contents were deleted.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if output_dir.is_dir() {
        let is_empty = fs::read_dir(output_dir)?.next().is_none();
        if is_empty {
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace its \
            contents or --output-dir to choose a different folder."
        );
        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Which of the two runs a row of output belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    /// Every train at its baseline status
    Baseline,
    /// With the active override source applied
    Simulated,
}

/// A row of the induction list CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct InductionRow {
    run: RunKind,
    priority: usize,
    train_id: TrainID,
    readiness: u32,
    reason: String,
}

impl InductionRow {
    fn new(run: RunKind, entry: &InductionEntry) -> Self {
        Self {
            run,
            priority: entry.priority,
            train_id: entry.train_id.clone(),
            readiness: entry.readiness,
            reason: entry.reason.clone(),
        }
    }
}

/// A row of the effective status debug CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct EffectiveStatusRow {
    run: RunKind,
    train_id: TrainID,
    baseline_status: TrainStatus,
    effective_status: EffectiveStatus,
}

/// Writes the per-train detail of each run to CSV files
pub struct DataWriter {
    induction_writer: csv::Writer<File>,
    debug_writer: Option<csv::Writer<File>>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `save_debug_info` - Whether to also write every train's effective status
    pub fn create(output_path: &Path, save_debug_info: bool) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(&file_path)
                .with_context(|| format!("Could not create {}", file_path.display()))
        };

        let debug_writer = if save_debug_info {
            Some(new_writer(EFFECTIVE_STATUS_FILE_NAME)?)
        } else {
            None
        };

        Ok(Self {
            induction_writer: new_writer(INDUCTION_LIST_FILE_NAME)?,
            debug_writer,
        })
    }

    /// Write the output for one run
    pub fn write_run(
        &mut self,
        run: RunKind,
        roster: &[Train],
        overrides: &StatusOverrideMap,
        result: &SimulationResult,
    ) -> Result<()> {
        for entry in &result.ranked_induction_list {
            self.induction_writer
                .serialize(InductionRow::new(run, entry))?;
        }

        if let Some(wtr) = &mut self.debug_writer {
            for train in roster {
                wtr.serialize(EffectiveStatusRow {
                    run,
                    train_id: train.id.clone(),
                    baseline_status: train.status,
                    effective_status: effective_status(train, overrides),
                })?;
            }
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.induction_writer.flush()?;
        if let Some(wtr) = &mut self.debug_writer {
            wtr.flush()?;
        }

        Ok(())
    }
}

/// Metrics and advisories for one run, as written to the summary file
#[derive(Serialize)]
struct RunSummary<'a> {
    fleet_readiness: u32,
    service_capacity: u32,
    maintenance_backlog: usize,
    energy_efficiency: u32,
    warnings: &'a [String],
    recommendations: &'a [String],
    counts: &'a StatusCounts,
}

impl<'a> From<&'a SimulationResult> for RunSummary<'a> {
    fn from(result: &'a SimulationResult) -> Self {
        Self {
            fleet_readiness: result.fleet_readiness,
            service_capacity: result.service_capacity,
            maintenance_backlog: result.maintenance_backlog,
            energy_efficiency: result.energy_efficiency,
            warnings: &result.warnings,
            recommendations: &result.recommendations,
            counts: &result.counts,
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    active_source: Option<&'a ActiveSource>,
    baseline: RunSummary<'a>,
    simulated: RunSummary<'a>,
    impact: ImpactAnalysis,
}

/// Write the summary of the simulator's baseline and current results to file
pub fn write_summary(output_path: &Path, simulator: &Simulator) -> Result<()> {
    let summary = Summary {
        active_source: simulator.active_source(),
        baseline: simulator.baseline().into(),
        simulated: simulator.current().into(),
        impact: simulator.impact(),
    };
    let file_path = output_path.join(SUMMARY_FILE_NAME);
    fs::write(&file_path, toml::to_string(&summary)?)
        .with_context(|| format!("Could not write {}", file_path.display()))?;

    Ok(())
}
