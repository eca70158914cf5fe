use thiserror::Error;

pub type MxResult<T> = Result<T, MxError>;

/// Error shared by every mixlab crate. Crate-level errors convert into it.
#[derive(Error, Debug)]
pub enum MxError {
    /// A computed quantity came out NaN or infinite.
    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },

    /// Caller input outside its accepted range (negative mass, bad target, ...).
    #[error("invalid input: {what}")]
    InvalidArg { what: String },

    /// Unknown substance or ingredient id.
    #[error("no such {what}")]
    NotFound { what: String },

    /// A root-finder or the composition search gave up.
    #[error("did not converge: {what}")]
    Convergence { what: String },

    /// Broken structural rule (duplicate id, cycle, malformed catalog).
    #[error("inconsistent data: {what}")]
    Invariant { what: String },
}
