//! Error types for solver operations.

use mx_acidbase::AcidBaseError;
use mx_catalog::CatalogError;
use mx_core::MxError;
use mx_mixture::MixtureError;
use thiserror::Error;

/// Errors that can occur while fitting a volume or solving a composition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid target {what}: {value}")]
    InvalidTarget { what: &'static str, value: f64 },

    #[error("Invalid volume: {volume_ml} mL")]
    InvalidVolume { volume_ml: f64 },

    #[error("Invalid mixture: {what}")]
    InvalidMixture { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Mixture error: {0}")]
    Mixture(#[from] MixtureError),

    #[error("pH error: {0}")]
    AcidBase(#[from] AcidBaseError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for MxError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidTarget { what, value } => MxError::InvalidArg {
                what: format!("target {what} = {value}"),
            },
            SolverError::InvalidVolume { volume_ml } => MxError::InvalidArg {
                what: format!("volume {volume_ml} mL"),
            },
            SolverError::InvalidMixture { what } => MxError::InvalidArg { what },
            SolverError::ConvergenceFailed { what } => MxError::Convergence { what },
            SolverError::Mixture(err) => err.into(),
            SolverError::AcidBase(err) => err.into(),
            SolverError::Catalog(err) => err.into(),
        }
    }
}
