//! Common functionality for fleetsim.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod access;
pub mod cli;
pub mod fleet;
pub mod id;
pub mod input;
pub mod log;
pub mod output;
pub mod scenario;
pub mod session;
pub mod settings;
pub mod simulation;
pub mod train;

#[cfg(test)]
mod fixture;

/// Get config dir for program.
///
/// This is where the settings file and the session file are stored.
pub fn get_fleetsim_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config dir on this platform, so fall back to the current directory
        return PathBuf::new();
    };

    config_dir.push("fleetsim");
    config_dir
}
