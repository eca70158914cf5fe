//! Reading and writing mixture and config files.

use crate::error::{CliError, CliResult};
use mx_catalog::Catalog;
use mx_mixture::{Mixture, SerializedMixture};
use mx_solver::SolverConfig;
use std::fs;
use std::path::Path;

pub fn load_mixture(path: &Path, catalog: &Catalog) -> CliResult<Mixture> {
    let text = fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let data: SerializedMixture =
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Mixture::from_serialized(&data, catalog)?)
}

/// Write `mixture` as JSON to `path`, or to stdout without one.
pub fn save_mixture(mixture: &Mixture, path: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&mixture.to_serialized())?;
    match path {
        Some(path) => fs::write(path, json + "\n").map_err(|source| CliError::FileWrite {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

pub fn load_config(path: Option<&Path>) -> CliResult<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}
