//! Metadata describing a run, written alongside its results.
use crate::access::Role;
use crate::session::Session;
use anyhow::{Context, Result};
use chrono::Local;
use platform_info::{PlatformInfo, PlatformInfoAPI, UNameAPI};
use serde::Serialize;
use std::fs;
use std::path::Path;

const METADATA_FILE_NAME: &str = "metadata.toml";

/// Information about the program build via `built` crate
mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Short git commit hash of the build, marked if the tree was dirty
fn get_git_hash() -> String {
    let Some(hash) = built_info::GIT_COMMIT_HASH_SHORT else {
        return "unknown".into();
    };

    if built_info::GIT_DIRTY == Some(true) {
        format!("{hash}-dirty")
    } else {
        hash.into()
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    run: RunMetadata<'a>,
    program: ProgramMetadata<'a>,
    platform: PlatformMetadata,
}

/// Who ran the simulation
#[derive(Serialize)]
struct Operator<'a> {
    username: &'a str,
    name: &'a str,
    role: Role,
}

impl<'a> From<&'a Session> for Operator<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            username: &session.user.username,
            name: &session.user.name,
            role: session.user.role,
        }
    }
}

#[derive(Serialize)]
struct RunMetadata<'a> {
    /// Path to the fleet which was simulated
    fleet_path: &'a Path,
    /// Description of the override source, or "baseline"
    source: &'a str,
    /// The date and time at which the run started
    datetime: String,
    /// The logged-in user, if there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    operator: Option<Operator<'a>>,
}

#[derive(Serialize)]
struct ProgramMetadata<'a> {
    name: &'a str,
    version: &'a str,
    target: &'a str,
    is_debug: bool,
    rustc_version: &'a str,
    build_time_utc: &'a str,
    git_commit_hash: String,
}

impl ProgramMetadata<'_> {
    fn from_build() -> Self {
        Self {
            name: built_info::PKG_NAME,
            version: built_info::PKG_VERSION,
            target: built_info::TARGET,
            is_debug: built_info::DEBUG,
            rustc_version: built_info::RUSTC_VERSION,
            build_time_utc: built_info::BUILT_TIME_UTC,
            git_commit_hash: get_git_hash(),
        }
    }
}

/// The machine the program is running on, from [`PlatformInfo`]
#[derive(Serialize)]
struct PlatformMetadata {
    sysname: String,
    nodename: String,
    release: String,
    version: String,
    machine: String,
    osname: String,
}

impl PlatformMetadata {
    fn detect() -> Result<Self> {
        let info = PlatformInfo::new()
            .ok()
            .context("Unable to determine platform info")?;
        Ok(Self {
            sysname: info.sysname().to_string_lossy().into(),
            nodename: info.nodename().to_string_lossy().into(),
            release: info.release().to_string_lossy().into(),
            version: info.version().to_string_lossy().into(),
            machine: info.machine().to_string_lossy().into(),
            osname: info.osname().to_string_lossy().into(),
        })
    }
}

/// Write metadata for a run to the output folder in TOML format
///
/// # Arguments
///
/// * `output_path` - Folder where the file will be saved
/// * `fleet_path` - The fleet directory which was simulated
/// * `source` - Description of the override source used
/// * `session` - The current session, if someone is logged in
pub fn write_metadata(
    output_path: &Path,
    fleet_path: &Path,
    source: &str,
    session: Option<&Session>,
) -> Result<()> {
    let metadata = Metadata {
        run: RunMetadata {
            fleet_path,
            source,
            datetime: Local::now().to_rfc2822(),
            operator: session.map(Operator::from),
        },
        program: ProgramMetadata::from_build(),
        platform: PlatformMetadata::detect()?,
    };
    let file_path = output_path.join(METADATA_FILE_NAME);
    fs::write(&file_path, toml::to_string(&metadata)?)?;

    Ok(())
}
