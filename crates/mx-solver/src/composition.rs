//! Multi-target composition search.
//!
//! Starting from the caller's mixture fitted to the target volume, every move
//! rescales the top-level ingredients by the needs of the classes they provide,
//! refits the volume, and is accepted or rejected by the annealer.

use crate::anneal::{AnnealProblem, Annealer};
use crate::candidate::Candidate;
use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::needs::Needs;
use crate::provision::provisions;
use crate::targets::Targets;
use crate::volume::{fit_volume, mass_for_volume};
use mx_catalog::Catalog;
use mx_core::in_grams;
use mx_mixture::{Mixture, MixtureProperties};
use tracing::{info, warn};

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionSolution {
    pub mixture: Mixture,
    pub properties: MixtureProperties,
    /// Norm of the remaining deviations
    pub error: f64,
    pub iterations: usize,
}

struct CompositionProblem<'a> {
    targets: &'a Targets,
    catalog: &'a Catalog,
    config: &'a SolverConfig,
}

impl AnnealProblem for CompositionProblem<'_> {
    type State = Candidate;
    type Error = SolverError;

    fn energy(&self, state: &Candidate) -> f64 {
        state.error
    }

    fn neighbor(&self, state: &Candidate, temperature: f64) -> SolverResult<Option<Candidate>> {
        let needs = Needs::assess(state, self.targets, self.catalog, self.config.damping)?;
        let temper = temperature.clamp(0.0, 1.0);

        let mut mixture = state.mixture.clone();
        for provision in provisions(&state.mixture, self.catalog)? {
            let factor = needs.ingredient_factor(&provision.classes);
            let tempered = 1.0 + (factor - 1.0) * temper;
            if tempered != 1.0 {
                mixture.scale_ingredient(provision.ingredient_id.as_str(), tempered)?;
            }
        }

        let Some(mass) = mass_for_volume(
            &mixture,
            self.targets.volume,
            self.catalog,
            &self.config.volume,
        )?
        else {
            return Ok(None);
        };
        let root = mixture.id().clone();
        mixture.set_ingredient_mass(in_grams(mass), root.as_str())?;

        Candidate::evaluate(mixture, self.targets, self.catalog).map(Some)
    }
}

/// Find masses for `mixture`'s ingredients that hit `targets`, with default
/// settings.
pub fn solve(mixture: &Mixture, targets: &Targets, catalog: &Catalog) -> SolverResult<Mixture> {
    solve_with_config(mixture, targets, catalog, &SolverConfig::default())
        .map(|solution| solution.mixture)
}

pub fn solve_with_config(
    mixture: &Mixture,
    targets: &Targets,
    catalog: &Catalog,
    config: &SolverConfig,
) -> SolverResult<CompositionSolution> {
    targets.validate()?;
    mixture
        .validate(catalog)
        .map_err(|err| SolverError::InvalidMixture {
            what: err.to_string(),
        })?;
    if mixture.mass() <= 0.0 {
        return Err(SolverError::InvalidMixture {
            what: "mixture has no mass".to_string(),
        });
    }

    let mut start = mixture.clone();
    fit_volume(&mut start, targets.volume, catalog, &config.volume)?;
    let initial = Candidate::evaluate(start, targets, catalog)?;
    info!(
        error = initial.error,
        abv = initial.properties.abv,
        brix = initial.properties.brix,
        ph = initial.properties.ph,
        "starting composition search"
    );

    let problem = CompositionProblem {
        targets,
        catalog,
        config,
    };
    let outcome = Annealer::new(config.anneal)
        .stop_below(config.tolerance)
        .run(&problem, initial)?;
    let iterations = outcome.iterations;
    let (best, error) = outcome.into_better();

    if error > config.failure_threshold() {
        warn!(error, iterations, "composition search did not converge");
        return Err(SolverError::ConvergenceFailed {
            what: format!("composition error {error:.3e} after {iterations} iterations"),
        });
    }

    info!(
        error,
        iterations,
        abv = best.properties.abv,
        brix = best.properties.brix,
        ph = best.properties.ph,
        volume = best.properties.volume,
        "composition solved"
    );
    Ok(CompositionSolution {
        mixture: best.mixture,
        properties: best.properties,
        error,
        iterations,
    })
}
