//! A stateful wrapper around the simulation engine for running several what-ifs in turn.
use super::{ImpactAnalysis, SimulationError, SimulationResult, compute_result};
use crate::scenario::{ActiveSource, OverrideSource, StatusOverrideMap};
use crate::train::Train;
use log::{error, info};

/// Holds a fleet roster together with its baseline and most recent simulation results
#[derive(Debug)]
pub struct Simulator {
    trains: Vec<Train>,
    baseline: SimulationResult,
    current: SimulationResult,
    active_source: Option<ActiveSource>,
}

impl Simulator {
    /// Create a new [`Simulator`], computing the baseline result for the roster.
    ///
    /// # Returns
    ///
    /// An error if the roster is empty.
    pub fn new(trains: Vec<Train>) -> Result<Self, SimulationError> {
        let baseline = compute_result(&trains, &StatusOverrideMap::new())?;
        Ok(Self {
            trains,
            current: baseline.clone(),
            baseline,
            active_source: None,
        })
    }

    /// Run a simulation with the given override source.
    ///
    /// The result is recomputed from the roster every time. If the engine fails, the previous
    /// result and active source are kept and the error is returned.
    pub fn run(&mut self, source: OverrideSource) -> Result<&SimulationResult, SimulationError> {
        match compute_result(&self.trains, &source.to_override_map()) {
            Ok(result) => {
                self.current = result;
                self.active_source = source.to_active();
                if let Some(active) = &self.active_source {
                    info!("Simulated {active}");
                }
                Ok(&self.current)
            }
            Err(err) => {
                error!("Simulation failed, keeping previous result: {err}");
                Err(err)
            }
        }
    }

    /// Go back to the baseline result and clear the active source
    pub fn reset(&mut self) {
        self.current = self.baseline.clone();
        self.active_source = None;
    }

    /// The roster being simulated
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// The result with every train at its baseline status
    pub fn baseline(&self) -> &SimulationResult {
        &self.baseline
    }

    /// The result of the most recent successful run (the baseline if there has been none)
    pub fn current(&self) -> &SimulationResult {
        &self.current
    }

    /// The override source used for the current result, if any
    pub fn active_source(&self) -> Option<&ActiveSource> {
        self.active_source.as_ref()
    }

    /// Compare the current result against the baseline
    pub fn impact(&self) -> ImpactAnalysis {
        ImpactAnalysis::new(&self.baseline, &self.current)
    }
}
