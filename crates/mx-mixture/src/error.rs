use mx_acidbase::AcidBaseError;
use mx_catalog::CatalogError;
use mx_core::{Id, MxError};
use thiserror::Error;

pub type MixtureResult<T> = Result<T, MixtureError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixtureError {
    #[error("Ingredient not found: {id}")]
    IngredientNotFound { id: Id },

    #[error("Invalid mass for {what}: {value}")]
    InvalidMass { what: String, value: f64 },

    #[error("Id already present in mixture: {id}")]
    DuplicateId { id: Id },

    #[error("Edge {edge} points at mixture {mixture} but does not carry its id")]
    EdgeIdMismatch { edge: Id, mixture: Id },

    #[error("Serialized mixture references missing node: {id}")]
    MissingNode { id: Id },

    #[error("Serialized mixture contains a cycle through: {id}")]
    Cycle { id: Id },

    #[error("Root node is not a mixture: {id}")]
    RootNotMixture { id: Id },

    #[error("Malformed serialized mixture: {what}")]
    Malformed { what: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("pH error: {0}")]
    AcidBase(#[from] AcidBaseError),
}

impl From<MixtureError> for MxError {
    fn from(e: MixtureError) -> Self {
        match e {
            MixtureError::IngredientNotFound { id } => MxError::NotFound {
                what: format!("ingredient {id}"),
            },
            MixtureError::InvalidMass { what, value } => MxError::InvalidArg {
                what: format!("mass {value} for {what}"),
            },
            MixtureError::Catalog(err) => err.into(),
            MixtureError::AcidBase(err) => err.into(),
            other => MxError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
