//! Scoring a mixture against targets.

use crate::error::SolverResult;
use crate::targets::Targets;
use mx_catalog::Catalog;
use mx_core::deviation;
use mx_mixture::{Mixture, MixtureProperties};
use nalgebra::Vector4;

/// Relative deviation of each property from its target (`1 - target/actual`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Deviations {
    pub abv: f64,
    pub brix: f64,
    pub volume: f64,
    /// Measured on ln(moles of H+)
    pub ph: f64,
}

impl Deviations {
    pub fn between(properties: &MixtureProperties, targets: &Targets) -> Self {
        Self {
            abv: deviation(properties.abv, targets.abv),
            brix: deviation(properties.brix, targets.brix),
            volume: deviation(properties.volume, targets.volume_ml()),
            ph: ph_deviation(properties.total_moles_h, targets.moles_h()),
        }
    }

    pub fn as_vector(&self) -> Vector4<f64> {
        Vector4::new(self.abv, self.brix, self.volume, self.ph)
    }

    /// Euclidean norm of all four deviations.
    pub fn error(&self) -> f64 {
        self.as_vector().norm()
    }
}

fn ph_deviation(actual_moles: f64, target_moles: f64) -> f64 {
    if actual_moles > 0.0 && target_moles > 0.0 {
        deviation(actual_moles.ln(), target_moles.ln())
    } else {
        deviation(actual_moles.max(0.0), target_moles.max(0.0))
    }
}

/// A mixture together with how far it is from the targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub mixture: Mixture,
    pub properties: MixtureProperties,
    pub deviations: Deviations,
    pub error: f64,
}

impl Candidate {
    pub fn evaluate(mixture: Mixture, targets: &Targets, catalog: &Catalog) -> SolverResult<Self> {
        let properties = mixture.properties(catalog)?;
        let deviations = Deviations::between(&properties, targets);
        Ok(Self {
            mixture,
            properties,
            deviations,
            error: deviations.error(),
        })
    }
}
