//! mx-core: stable foundation for mixlab.
//!
//! Contains:
//! - units (uom SI types + constructors for grams/millilitres)
//! - numeric (zero-mass threshold, relative deviation)
//! - ids (stable string IDs for mixtures and ingredient edges)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Flat re-exports for the downstream crates
pub use error::{MxError, MxResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
