//! The example fleets bundled with the program and the CLI commands for using them.
use super::{RunOpts, handle_run_command};
use crate::session::{FileSessionStore, SessionStore};
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the example fleets.
static FLEETS_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/fleets");

/// The available subcommands for managing example fleets.
#[derive(Subcommand)]
pub enum ExampleSubcommands {
    /// List available examples.
    List,
    /// Provide information about the specified example.
    Info {
        /// The name of the example.
        name: String,
    },
    /// Extract an example fleet to a new directory.
    Extract {
        /// The name of the example to extract.
        name: String,
        /// The destination folder for the example.
        new_path: Option<PathBuf>,
    },
    /// Run an example.
    Run {
        /// The name of the example to run.
        name: String,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
}

impl ExampleSubcommands {
    /// Execute the supplied example subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_example_list_command(),
            Self::Info { name } => handle_example_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_example_extract_command(&name, dest.as_deref())?,
            Self::Run { name, opts } => {
                handle_example_run_command(&name, &opts, None, &mut FileSessionStore::new())?;
            }
        }

        Ok(())
    }
}

/// Names of the bundled example fleets
pub fn example_names() -> impl Iterator<Item = &'static str> {
    FLEETS_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// Look up a bundled example fleet by name
fn get_example(name: &str) -> Result<&'static Dir<'static>> {
    FLEETS_DIR
        .get_dir(name)
        .with_context(|| format!("Example \"{name}\" not found."))
}

/// Handle the `example list` command.
fn handle_example_list_command() {
    for name in example_names() {
        println!("{name}");
    }
}

/// Handle the `example info` command.
fn handle_example_info_command(name: &str) -> Result<()> {
    println!("{}", example_readme(name)?);

    Ok(())
}

/// The contents of an example's README
fn example_readme(name: &str) -> Result<&'static str> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    FLEETS_DIR
        .get_file(path)
        .with_context(|| format!("Example \"{name}\" not found."))?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")
}

/// Handle the `example extract` command
fn handle_example_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_example(name, dest)
}

/// Copy the files of the named example into a new directory
fn extract_example(name: &str, new_path: &Path) -> Result<()> {
    let example = get_example(name)?;

    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir(new_path)?;
    for entry in example.entries() {
        let DirEntry::File(file) = entry else {
            bail!("Example \"{name}\" contains subdirectories, which are not supported");
        };
        let file_name = file
            .path()
            .file_name()
            .context("Example file has no name")?;
        fs::write(new_path.join(file_name), file.contents())?;
    }

    Ok(())
}

/// Handle the `example run` command.
pub fn handle_example_run_command<S: SessionStore>(
    name: &str,
    opts: &RunOpts,
    settings: Option<Settings>,
    session_store: &mut S,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let fleet_path = temp_dir.path().join(name);
    extract_example(name, &fleet_path)?;
    handle_run_command(&fleet_path, opts, settings, session_store)
}
