//! Solvers over mixlab mixtures.
//!
//! - [`volume`]: total mass for a requested volume
//! - [`composition`]: ingredient masses for requested volume, ABV, Brix and pH,
//!   searched by simulated annealing ([`anneal`])

pub mod anneal;
pub mod candidate;
pub mod composition;
pub mod config;
pub mod error;
pub mod needs;
pub mod provision;
pub mod targets;
pub mod volume;

pub use anneal::{AnnealOutcome, AnnealProblem, Annealer};
pub use candidate::{Candidate, Deviations};
pub use composition::{CompositionSolution, solve, solve_with_config};
pub use config::{AnnealConfig, SolverConfig, VolumeConfig};
pub use error::{SolverError, SolverResult};
pub use needs::Needs;
pub use provision::{Provision, SubstanceClass, provisions};
pub use targets::Targets;
pub use volume::{fit_volume, mass_for_volume};
