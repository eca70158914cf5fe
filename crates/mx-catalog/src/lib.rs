//! mx-catalog: substance data for mixlab.
//!
//! Provides:
//! - Substance definitions (density, molecular mass, pKa list, sweetness, energy)
//! - Measured density-vs-concentration curves
//! - Acid <-> conjugate-base adjacency
//! - Citrus juice dissociation constants
//! - A built-in catalog of common beverage substances
//!
//! # Architecture
//!
//! The catalog is an immutable registry built once and passed by reference into
//! the mixture model and both solvers. Nothing in the workspace reads it as
//! ambient global state.
//!
//! # Example
//!
//! ```
//! use mx_catalog::{Catalog, ids};
//!
//! let catalog = Catalog::builtin();
//! let ethanol = catalog.lookup(ids::ETHANOL).unwrap();
//! assert!(ethanol.pure_density < 1.0);
//! assert!(catalog.is_conjugate_base_of(ids::SODIUM_CITRATE, ids::CITRIC_ACID));
//! ```

pub mod catalog;
pub mod citrus;
pub mod curve;
pub mod error;
pub mod ids;
pub mod substance;

// Re-exports for ergonomics
pub use catalog::{Catalog, builtin_substances};
pub use citrus::CitrusKind;
pub use curve::DensityCurve;
pub use error::{CatalogError, CatalogResult};
pub use substance::{Substance, SubstanceId};
