//! Error types for acid-base calculations.

use mx_catalog::CatalogError;
use mx_core::MxError;
use thiserror::Error;

/// Errors that can occur while solving for pH.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcidBaseError {
    /// The residual does not change sign over the bracket, or there is nothing
    /// to balance. The acid/base combination is unphysical for these inputs.
    #[error("No bracketed root: {what}")]
    Unbracketed { what: String },

    #[error("Invalid volume: {volume_ml} mL")]
    InvalidVolume { volume_ml: f64 },

    #[error("Invalid pKa list: {what}")]
    InvalidPka { what: &'static str },

    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub type AcidBaseResult<T> = Result<T, AcidBaseError>;

impl From<AcidBaseError> for MxError {
    fn from(e: AcidBaseError) -> Self {
        match e {
            AcidBaseError::Unbracketed { what } => MxError::Convergence {
                what: format!("unbracketed pH root: {what}"),
            },
            AcidBaseError::InvalidVolume { volume_ml } => MxError::InvalidArg {
                what: format!("volume {volume_ml} mL"),
            },
            AcidBaseError::InvalidPka { what } => MxError::InvalidArg {
                what: format!("pKa list: {what}"),
            },
            AcidBaseError::NonFinite { what } => MxError::NonFinite {
                what,
                value: f64::NAN,
            },
            AcidBaseError::Catalog(err) => err.into(),
        }
    }
}
