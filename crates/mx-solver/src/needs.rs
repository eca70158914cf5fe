//! Multiplicative corrections per substance class.

use crate::candidate::Candidate;
use crate::error::SolverResult;
use crate::provision::{SubstanceClass, acids_present};
use crate::targets::Targets;
use mx_acidbase::{buffer_capacity, group_solutes};
use mx_catalog::Catalog;
use mx_mixture::Mixture;
use std::collections::{BTreeMap, BTreeSet};

/// Bounds on any single pH correction.
const PH_FACTOR_MIN: f64 = 0.1;
const PH_FACTOR_MAX: f64 = 10.0;

/// Per-class mass factors for one move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Needs {
    factors: BTreeMap<SubstanceClass, f64>,
}

impl Needs {
    pub fn factor(&self, class: SubstanceClass) -> f64 {
        self.factors.get(&class).copied().unwrap_or(1.0)
    }

    fn scale(&mut self, class: SubstanceClass, factor: f64) {
        *self.factors.entry(class).or_insert(1.0) *= factor;
    }

    /// Product of the factors of every class an ingredient provides.
    pub fn ingredient_factor(&self, classes: &BTreeSet<SubstanceClass>) -> f64 {
        classes.iter().map(|class| self.factor(*class)).product()
    }

    /// Corrections moving `candidate` toward `targets`.
    ///
    /// ABV and Brix deviations are clamped to [-1, 1] so every factor stays
    /// positive.
    pub fn assess(
        candidate: &Candidate,
        targets: &Targets,
        catalog: &Catalog,
        damping: f64,
    ) -> SolverResult<Self> {
        let mut needs = Needs::default();

        let abv = candidate.deviations.abv.clamp(-1.0, 1.0);
        needs.scale(SubstanceClass::Ethanol, 1.0 - damping * abv);
        needs.scale(SubstanceClass::Water, 1.0 + damping * abv);

        let brix = candidate.deviations.brix.clamp(-1.0, 1.0);
        needs.scale(SubstanceClass::Sweetener, 1.0 - damping * brix);
        needs.scale(SubstanceClass::Water, 1.0 + damping * brix);

        needs.assess_ph(candidate, targets, catalog, damping)?;
        Ok(needs)
    }

    fn assess_ph(
        &mut self,
        candidate: &Candidate,
        targets: &Targets,
        catalog: &Catalog,
        damping: f64,
    ) -> SolverResult<()> {
        let actual = candidate.properties.ph;
        let shift = actual - targets.ph;
        if shift == 0.0 {
            return Ok(());
        }
        let lower = shift > 0.0;

        let (acid_moles, base_moles) = species_moles(&candidate.mixture, catalog)?;
        if acid_moles <= 0.0 {
            return Ok(());
        }

        if base_moles > 0.0 {
            let volume_ml = candidate.properties.volume;
            let solutes: Vec<_> = candidate
                .mixture
                .substances()
                .map(|s| s.to_solute())
                .collect();
            let groups = group_solutes(volume_ml, &solutes, catalog)?;
            let beta = buffer_capacity(candidate.properties.h_molarity, &groups);
            let moles = beta * shift.abs() * volume_ml / 1000.0;

            // Put the shift on the minority species of the pair.
            let (class, factor) = match (lower, acid_moles <= base_moles) {
                (true, true) => (SubstanceClass::Acid, 1.0 + damping * moles / acid_moles),
                (true, false) => (SubstanceClass::Base, 1.0 - damping * moles / base_moles),
                (false, true) => (SubstanceClass::Acid, 1.0 - damping * moles / acid_moles),
                (false, false) => (SubstanceClass::Base, 1.0 + damping * moles / base_moles),
            };
            self.scale(class, factor.clamp(PH_FACTOR_MIN, PH_FACTOR_MAX));
        } else {
            let ratio = targets.h_molarity() / candidate.properties.h_molarity;
            let factor = ratio.powf(2.0 * damping);
            self.scale(
                SubstanceClass::Acid,
                factor.clamp(PH_FACTOR_MIN, PH_FACTOR_MAX),
            );
        }
        Ok(())
    }
}

/// Moles of acids and of conjugate bases whose acid is present.
fn species_moles(mixture: &Mixture, catalog: &Catalog) -> SolverResult<(f64, f64)> {
    let mut acid = 0.0;
    let mut base = 0.0;
    let acids = acids_present(mixture, catalog)?;
    for decorated in mixture.substances() {
        let substance = catalog.lookup(decorated.substance_id.as_str())?;
        if substance.is_acid() {
            acid += substance.moles(decorated.mass);
        } else if substance
            .conjugate_acid
            .as_ref()
            .is_some_and(|a| acids.contains(a))
        {
            base += substance.moles(decorated.mass);
        }
    }
    Ok((acid, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_catalog::ids;
    use mx_core::ml;
    use mx_mixture::Ingredient;

    fn candidate(parts: &[(&str, f64)], targets: &Targets) -> Candidate {
        let catalog = Catalog::builtin();
        let mut mixture = Mixture::new();
        for (id, mass) in parts {
            mixture
                .add_ingredient(Ingredient::substance(*id, *mass))
                .unwrap();
        }
        Candidate::evaluate(mixture, targets, &catalog).unwrap()
    }

    #[test]
    fn weak_spirit_wants_more_ethanol() {
        let catalog = Catalog::builtin();
        let targets = Targets::new(ml(100.0), 60.0, 0.0, 7.0);
        let c = candidate(&[(ids::ETHANOL, 30.0), (ids::WATER, 70.0)], &targets);
        let needs = Needs::assess(&c, &targets, &catalog, 0.5).unwrap();
        assert!(needs.factor(SubstanceClass::Ethanol) > 1.0);
        assert!(needs.factor(SubstanceClass::Water) < 1.0);
        assert_eq!(needs.factor(SubstanceClass::Acid), 1.0);
    }

    #[test]
    fn sweet_mixture_wants_less_sugar() {
        let catalog = Catalog::builtin();
        let targets = Targets::new(ml(100.0), 0.0, 10.0, 7.0);
        let c = candidate(&[(ids::SUCROSE, 30.0), (ids::WATER, 70.0)], &targets);
        let needs = Needs::assess(&c, &targets, &catalog, 0.5).unwrap();
        assert!(needs.factor(SubstanceClass::Sweetener) < 1.0);
        assert!(needs.factor(SubstanceClass::Water) > 1.0);
    }

    #[test]
    fn factors_stay_positive_far_from_target() {
        let catalog = Catalog::builtin();
        let targets = Targets::new(ml(100.0), 90.0, 0.0, 7.0);
        let c = candidate(&[(ids::ETHANOL, 1.0), (ids::WATER, 99.0)], &targets);
        let needs = Needs::assess(&c, &targets, &catalog, 0.5).unwrap();
        assert!(needs.factor(SubstanceClass::Water) > 0.0);
        assert!((needs.factor(SubstanceClass::Ethanol) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn unbuffered_acid_follows_h_ratio() {
        let catalog = Catalog::builtin();
        let targets = Targets::new(ml(100.0), 0.0, 0.0, 3.0);
        let c = candidate(&[(ids::CITRIC_ACID, 1.0), (ids::WATER, 99.0)], &targets);
        assert!(c.properties.ph < 3.0);
        let needs = Needs::assess(&c, &targets, &catalog, 0.5).unwrap();
        let expected = 10f64.powf(c.properties.ph - 3.0);
        assert!((needs.factor(SubstanceClass::Acid) - expected).abs() < 1e-9);
    }

    #[test]
    fn buffer_moves_minority_species() {
        let catalog = Catalog::builtin();
        // Citrate is the minority in moles (4 g / 294 vs 3 g / 192).
        let parts = [
            (ids::CITRIC_ACID, 3.0),
            (ids::SODIUM_CITRATE, 4.0),
            (ids::WATER, 93.0),
        ];
        let lower = Targets::new(ml(100.0), 0.0, 0.0, 3.5);
        let c = candidate(&parts, &lower);
        let needs = Needs::assess(&c, &lower, &catalog, 0.5).unwrap();
        assert!(needs.factor(SubstanceClass::Base) < 1.0);
        assert_eq!(needs.factor(SubstanceClass::Acid), 1.0);

        let raise = Targets::new(ml(100.0), 0.0, 0.0, 5.0);
        let c = candidate(&parts, &raise);
        let needs = Needs::assess(&c, &raise, &catalog, 0.5).unwrap();
        assert!(needs.factor(SubstanceClass::Base) > 1.0);
        assert_eq!(needs.factor(SubstanceClass::Acid), 1.0);
    }

    #[test]
    fn no_acid_leaves_ph_alone() {
        let catalog = Catalog::builtin();
        let targets = Targets::new(ml(100.0), 0.0, 0.0, 3.0);
        let c = candidate(&[(ids::WATER, 100.0)], &targets);
        let needs = Needs::assess(&c, &targets, &catalog, 0.5).unwrap();
        assert_eq!(needs.factor(SubstanceClass::Acid), 1.0);
        assert_eq!(needs.factor(SubstanceClass::Base), 1.0);
    }
}
