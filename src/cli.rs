//! The command line interface for fleetsim.
use crate::fleet::Fleet;
use crate::input::load_fleet;
use crate::log;
use crate::output::metadata::write_metadata;
use crate::output::{DataWriter, RunKind, create_output_directory, get_output_dir, write_summary};
use crate::scenario::{OverrideSource, StatusOverrideMap};
use crate::session::{FileSessionStore, SessionStore};
use crate::settings::Settings;
use crate::simulation::{SimulationResult, Simulator};
use crate::train::TrainID;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod session;
use session::SessionSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for fleetsim.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// ID of a scenario from the fleet's catalogue to simulate
    #[arg(long, conflicts_with = "unavailable")]
    pub scenario: Option<String>,
    /// IDs of trains to withdraw for branding, separated by commas
    #[arg(long, value_delimiter = ',')]
    pub unavailable: Vec<String>,
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// Whether to write every train's effective status to a CSV file
    #[arg(long)]
    pub debug_output: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Simulate a fleet against its baseline.
    Run {
        /// Path to the fleet directory.
        fleet_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Validate a fleet.
    Validate {
        /// Path to the fleet directory.
        fleet_dir: PathBuf,
    },
    /// List the scenarios available for a fleet.
    Scenarios {
        /// Path to the fleet directory.
        fleet_dir: PathBuf,
    },
    /// Manage example fleets.
    Example {
        /// The available subcommands for managing example fleets.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage program settings.
    Settings {
        /// The subcommands for managing settings.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
    /// Log in and out.
    Session {
        /// The subcommands for managing the session.
        #[command(subcommand)]
        subcommand: SessionSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { fleet_dir, opts } => {
                handle_run_command(&fleet_dir, &opts, None, &mut FileSessionStore::new())
            }
            Self::Validate { fleet_dir } => handle_validate_command(&fleet_dir, None),
            Self::Scenarios { fleet_dir } => handle_scenarios_command(&fleet_dir),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
            Self::Session { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start fleetsim
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ fleetsim --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load settings from file, unless the caller has supplied them
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// The override source selected by the run options
fn override_source<'a>(
    fleet: &'a Fleet,
    opts: &RunOpts,
    selection: &'a [TrainID],
) -> Result<OverrideSource<'a>> {
    if let Some(id) = &opts.scenario {
        return Ok(OverrideSource::Scenario(fleet.get_scenario(id)?));
    }

    if selection.is_empty() {
        return Ok(OverrideSource::Baseline);
    }

    let unknown = fleet.unknown_trains(selection);
    if !unknown.is_empty() {
        warn!(
            "Ignoring unknown train(s) in selection: {}",
            unknown.into_iter().join(", ")
        );
    }

    Ok(OverrideSource::Selection(selection))
}

/// Log the headline figures of a run
fn log_result(label: &str, result: &SimulationResult) {
    info!(
        "{label}: readiness {}%, capacity {}%, maintenance backlog {}, energy efficiency {}%",
        result.fleet_readiness,
        result.service_capacity,
        result.maintenance_backlog,
        result.energy_efficiency
    );
}

/// Handle the `run` command.
///
/// The operator recorded in the run metadata is read from `session_store`.
pub fn handle_run_command<S: SessionStore>(
    fleet_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
    session_store: &mut S,
) -> Result<()> {
    let settings = load_settings(settings)?;

    // Command-line flags can only turn these settings on
    let allow_overwrite = opts.overwrite || settings.overwrite;
    let debug_output = opts.debug_output || settings.debug_output;

    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(fleet_path)?;
        &pathbuf
    };

    let overwritten = create_output_directory(output_path, allow_overwrite).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    log::init(Some(&settings.log_level), Some(output_path))
        .context("Failed to initialise logging.")?;

    let fleet = load_fleet(fleet_path).context("Failed to load fleet.")?;
    info!(
        "Loaded {} train(s) and {} scenario(s) from {}",
        fleet.trains.len(),
        fleet.scenarios.len(),
        fleet_path.display()
    );
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwritten {
        warn!("Output folder will be overwritten");
    }

    let session = session_store.load()?;
    if let Some(session) = &session {
        info!("Running as {} ({})", session.user.name, session.user.role);
    }

    let selection = opts
        .unavailable
        .iter()
        .map(|id| TrainID::new(id.trim()))
        .collect_vec();
    let source = override_source(&fleet, opts, &selection)?;

    let mut simulator = Simulator::new(fleet.trains.clone())?;
    log_result("Baseline", simulator.baseline());
    let current = simulator.run(source)?;
    log_result("Simulated", current);
    for warning in &current.warnings {
        warn!("{warning}");
    }
    for recommendation in &current.recommendations {
        info!("Recommendation: {recommendation}");
    }

    let mut writer = DataWriter::create(output_path, debug_output)?;
    writer.write_run(
        RunKind::Baseline,
        simulator.trains(),
        &StatusOverrideMap::new(),
        simulator.baseline(),
    )?;
    writer.write_run(
        RunKind::Simulated,
        simulator.trains(),
        &source.to_override_map(),
        simulator.current(),
    )?;
    writer.flush()?;
    write_summary(output_path, &simulator)?;

    let source_desc = simulator
        .active_source()
        .map_or_else(|| "baseline".to_string(), ToString::to_string);
    write_metadata(output_path, fleet_path, &source_desc, session.as_ref())?;
    info!("Simulation complete!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(fleet_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = load_settings(settings)?;

    // No log files are saved when validating
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    let fleet = load_fleet(fleet_path).context("Failed to validate fleet.")?;
    Simulator::new(fleet.trains).context("Failed to validate fleet.")?;
    info!("Fleet validation successful!");

    Ok(())
}

/// Handle the `scenarios` command.
pub fn handle_scenarios_command(fleet_path: &Path) -> Result<()> {
    let settings = load_settings(None)?;
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    let fleet = load_fleet(fleet_path).context("Failed to load fleet.")?;
    if fleet.scenarios.is_empty() {
        println!("No scenarios defined for this fleet");
        return Ok(());
    }

    for scenario in fleet.scenarios.values() {
        println!(
            "{}: {} ({} change(s))\n    {}",
            scenario.id,
            scenario.name,
            scenario.changes.len(),
            scenario.description
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, branding_event, metro_trains};
    use crate::scenario::Scenario;
    use crate::train::Train;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fleet(metro_trains: Vec<Train>, branding_event: Scenario) -> Fleet {
        Fleet {
            trains: metro_trains,
            scenarios: [(branding_event.id.clone(), branding_event)]
                .into_iter()
                .collect(),
        }
    }

    #[rstest]
    fn test_override_source_baseline(fleet: Fleet) {
        let source = override_source(&fleet, &RunOpts::default(), &[]).unwrap();
        assert!(matches!(source, OverrideSource::Baseline));
    }

    #[rstest]
    fn test_override_source_scenario(fleet: Fleet) {
        let opts = RunOpts {
            scenario: Some("branding_event".into()),
            ..RunOpts::default()
        };
        let source = override_source(&fleet, &opts, &[]).unwrap();
        let OverrideSource::Scenario(scenario) = source else {
            panic!("Expected scenario source");
        };
        assert_eq!(scenario.id.to_string(), "branding_event");

        let opts = RunOpts {
            scenario: Some("peak_demand".into()),
            ..RunOpts::default()
        };
        assert_error!(
            override_source(&fleet, &opts, &[]),
            "Unknown scenario \"peak_demand\". Valid options are: branding_event"
        );
    }

    #[rstest]
    fn test_override_source_selection_keeps_unknown_ids(fleet: Fleet) {
        let selection: Vec<TrainID> = vec!["TRN-002".into(), "TRN-099".into()];
        let source = override_source(&fleet, &RunOpts::default(), &selection).unwrap();
        assert_eq!(source.to_override_map().len(), 2);
    }

    #[test]
    fn test_cli_scenario_conflicts_with_unavailable() {
        let result = Cli::try_parse_from([
            "fleetsim",
            "run",
            "fleet",
            "--scenario",
            "branding_event",
            "--unavailable",
            "TRN-001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_unavailable_list() {
        let cli =
            Cli::try_parse_from(["fleetsim", "run", "fleet", "--unavailable", "TRN-001,TRN-004"])
                .unwrap();
        let Some(Commands::Run { opts, .. }) = cli.command else {
            panic!("Expected run command");
        };
        assert_eq!(opts.unavailable, ["TRN-001", "TRN-004"]);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
