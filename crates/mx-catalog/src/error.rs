//! Catalog errors.

use mx_core::MxError;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while building or querying a substance catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Substance id is not registered.
    #[error("Unknown substance: {id}")]
    UnknownSubstance { id: String },

    /// Two entries share an id.
    #[error("Duplicate substance id: {id}")]
    DuplicateSubstance { id: String },

    /// A conjugate base names an acid that is missing or has no pKa values.
    #[error("Substance {base} links to invalid conjugate acid {acid}")]
    InvalidConjugate { base: String, acid: String },

    /// Malformed density curve.
    #[error("Invalid density curve: {what}")]
    InvalidCurve { what: &'static str },

    /// Non-physical constant (negative density, zero molecular mass, ...).
    #[error("Non-physical value for {what} on substance {id}")]
    NonPhysical { id: String, what: &'static str },
}

impl From<CatalogError> for MxError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownSubstance { id } => MxError::NotFound {
                what: format!("substance {id}"),
            },
            other => MxError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
