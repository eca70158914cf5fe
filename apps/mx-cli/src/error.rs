//! Errors surfaced by the command line.

use mx_mixture::MixtureError;
use mx_solver::SolverError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid mixture JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid solver config in {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Mixture error: {0}")]
    Mixture(#[from] MixtureError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type CliResult<T> = Result<T, CliError>;
