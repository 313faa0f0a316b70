//! Common routines for handling input data.
use crate::fleet::Fleet;
use crate::id::{HasID, IDLike};
use anyhow::{Context, Result, bail, ensure};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

pub mod scenario;
use scenario::read_scenarios;
pub mod train;
use train::read_trains;

/// Read a series of type `T`s from a CSV file.
///
/// Will raise an error if the file is empty.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    let vec = read_csv_internal(file_path)?;
    ensure!(!vec.is_empty(), input_err_msg_with(file_path, "CSV file cannot be empty"));

    Ok(vec.into_iter())
}

fn read_csv_internal<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let vec = csv::Reader::from_path(file_path)
        .with_context(|| input_err_msg(file_path))?
        .into_deserialize()
        .process_results(|iter| iter.collect_vec())
        .with_context(|| input_err_msg(file_path))?;

    Ok(vec)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Read an f64, checking that it is between 0 and 1
pub fn deserialise_proportion<'de, D>(deserialiser: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if !(0.0..=1.0).contains(&value) {
        Err(serde::de::Error::custom("Value must be between 0 and 1"))?;
    }

    Ok(value)
}

/// Format an error message to include the file path.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

fn input_err_msg_with<P: AsRef<Path>>(file_path: P, msg: &str) -> String {
    format!("{}: {msg}", input_err_msg(file_path))
}

/// Collect items with IDs into a map, checking that each ID is only used once.
///
/// The map preserves the order in which items were read.
pub fn try_collect_id_map<ID, T, I>(iter: I) -> Result<IndexMap<ID, T>>
where
    ID: IDLike,
    T: HasID<ID>,
    I: IntoIterator<Item = T>,
{
    let mut map = IndexMap::new();
    for item in iter {
        let id = item.get_id().clone();
        if map.contains_key(&id) {
            bail!("Duplicate ID found: {id}");
        }
        map.insert(id, item);
    }

    Ok(map)
}

/// Read a fleet from the specified directory.
///
/// # Arguments
///
/// * `fleet_dir` - Folder containing fleet input files
///
/// # Returns
///
/// The fleet's trains and scenario catalogue, or an error if the input is invalid.
pub fn load_fleet<P: AsRef<Path>>(fleet_dir: P) -> Result<Fleet> {
    let fleet_dir = fleet_dir.as_ref();
    let trains = read_trains(fleet_dir)?;
    let scenarios = read_scenarios(fleet_dir, &trains)?;

    Ok(Fleet {
        trains: trains.into_values().collect(),
        scenarios,
    })
}
