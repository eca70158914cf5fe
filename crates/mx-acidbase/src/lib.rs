//! Acid-base equilibrium for aqueous mixtures.
//!
//! Acids and their conjugate bases are grouped, converted to molarities and
//! each group's polyprotic charge balance is solved for [H+] by bisection.
//! The group results are summed into a single pH.

pub mod bisection;
pub mod buffer;
pub mod equilibrium;
pub mod error;

pub use bisection::{BisectionConfig, bisect};
pub use buffer::buffer_capacity;
pub use equilibrium::{AcidGroup, PhSolution, Solute, group_solutes, solve_ph, solve_polyprotic};
pub use error::{AcidBaseError, AcidBaseResult};
