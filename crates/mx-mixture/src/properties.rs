//! Physical properties derived from a flattened mixture.

use crate::error::{MixtureError, MixtureResult};
use crate::flatten::DecoratedSubstance;
use crate::ingredient::Item;
use crate::mixture::Mixture;
use mx_acidbase::{PhSolution, Solute, solve_ph};
use mx_catalog::{Catalog, Substance, SubstanceId, ids};
use serde::Serialize;
use std::collections::BTreeMap;

/// All derived properties of a mixture, computed from one flatten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixtureProperties {
    /// Mass of the substances the tree resolves to [g]
    pub mass: f64,
    /// [mL]
    pub volume: f64,
    /// [g/mL]
    pub density: f64,
    /// Alcohol by volume [%]
    pub abv: f64,
    /// Sweetness-weighted sugar content [%]
    pub brix: f64,
    pub ph: f64,
    /// Summed [H+] [mol/L]
    pub h_molarity: f64,
    pub total_moles_h: f64,
    pub kcal: f64,
    /// Sucrose-equivalent sugar [g]
    pub equivalent_sugar_mass: f64,
}

/// One flatten of a mixture, aggregated per substance.
struct Snapshot<'a> {
    catalog: &'a Catalog,
    /// Flattened total. Edges onto massless sub-mixtures carry no substance
    /// and are left out, so the weight fractions sum to one.
    mass: f64,
    masses: BTreeMap<&'a SubstanceId, f64>,
    decorated: Vec<DecoratedSubstance<'a>>,
}

impl<'a> Snapshot<'a> {
    fn take(mixture: &'a Mixture, catalog: &'a Catalog) -> Self {
        let decorated: Vec<_> = mixture.substances().collect();
        let mut masses = BTreeMap::new();
        let mut mass = 0.0;
        for substance in &decorated {
            *masses.entry(substance.substance_id).or_insert(0.0) += substance.mass;
            mass += substance.mass;
        }
        Self {
            catalog,
            mass,
            masses,
            decorated,
        }
    }

    fn density(&self) -> MixtureResult<f64> {
        if self.mass <= 0.0 {
            return Ok(0.0);
        }
        let mut density = 0.0;
        for (id, mass) in &self.masses {
            let substance = self.catalog.lookup(id.as_str())?;
            density += substance.partial_density(mass / self.mass);
        }
        Ok(density)
    }

    fn volume(&self, density: f64) -> f64 {
        if self.mass <= 0.0 || density <= 0.0 {
            return 0.0;
        }
        self.mass / density
    }

    fn abv(&self, volume: f64) -> MixtureResult<f64> {
        let Some(ethanol) = self.masses.get(&SubstanceId::new(ids::ETHANOL)) else {
            return Ok(0.0);
        };
        if volume <= 0.0 {
            return Ok(0.0);
        }
        let pure = self.catalog.lookup(ids::ETHANOL)?.pure_density;
        Ok(ethanol / pure / volume * 100.0)
    }

    fn weighted_sum(&self, weight: impl Fn(&Substance) -> f64) -> MixtureResult<f64> {
        let mut sum = 0.0;
        for (id, mass) in &self.masses {
            sum += mass * weight(self.catalog.lookup(id.as_str())?);
        }
        Ok(sum)
    }

    fn equivalent_sugar_mass(&self) -> MixtureResult<f64> {
        self.weighted_sum(|s| s.sweetness)
    }

    fn brix(&self, sugar: f64) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        sugar / self.mass * 100.0
    }

    fn kcal(&self) -> MixtureResult<f64> {
        self.weighted_sum(|s| s.kcal_per_gram)
    }

    fn ph(&self, volume: f64) -> MixtureResult<PhSolution> {
        let solutes: Vec<Solute> = self.decorated.iter().map(|s| s.to_solute()).collect();
        Ok(solve_ph(volume, &solutes, self.catalog)?)
    }

    fn properties(&self) -> MixtureResult<MixtureProperties> {
        let density = self.density()?;
        let volume = self.volume(density);
        let sugar = self.equivalent_sugar_mass()?;
        let ph = self.ph(volume)?;
        Ok(MixtureProperties {
            mass: self.mass,
            volume,
            density,
            abv: self.abv(volume)?,
            brix: self.brix(sugar),
            ph: ph.ph,
            h_molarity: ph.h_molarity,
            total_moles_h: ph.total_moles_h,
            kcal: self.kcal()?,
            equivalent_sugar_mass: sugar,
        })
    }
}

impl Mixture {
    /// [g/mL]; zero for an empty mixture.
    pub fn density(&self, catalog: &Catalog) -> MixtureResult<f64> {
        Snapshot::take(self, catalog).density()
    }

    /// [mL]
    pub fn volume(&self, catalog: &Catalog) -> MixtureResult<f64> {
        let snapshot = Snapshot::take(self, catalog);
        let density = snapshot.density()?;
        Ok(snapshot.volume(density))
    }

    pub fn abv(&self, catalog: &Catalog) -> MixtureResult<f64> {
        let snapshot = Snapshot::take(self, catalog);
        let volume = snapshot.volume(snapshot.density()?);
        snapshot.abv(volume)
    }

    pub fn brix(&self, catalog: &Catalog) -> MixtureResult<f64> {
        let snapshot = Snapshot::take(self, catalog);
        let sugar = snapshot.equivalent_sugar_mass()?;
        Ok(snapshot.brix(sugar))
    }

    pub fn equivalent_sugar_mass(&self, catalog: &Catalog) -> MixtureResult<f64> {
        Snapshot::take(self, catalog).equivalent_sugar_mass()
    }

    pub fn kcal(&self, catalog: &Catalog) -> MixtureResult<f64> {
        Snapshot::take(self, catalog).kcal()
    }

    pub fn ph(&self, catalog: &Catalog) -> MixtureResult<f64> {
        Ok(self.ph_solution(catalog)?.ph)
    }

    /// Full pH result including the moles of H+ in the mixture's volume.
    pub fn ph_solution(&self, catalog: &Catalog) -> MixtureResult<PhSolution> {
        let snapshot = Snapshot::take(self, catalog);
        let volume = snapshot.volume(snapshot.density()?);
        snapshot.ph(volume)
    }

    pub fn properties(&self, catalog: &Catalog) -> MixtureResult<MixtureProperties> {
        Snapshot::take(self, catalog).properties()
    }

    /// Check every substance reference resolves and every mass is finite.
    ///
    /// Remembered (negative) masses are valid zeroed edges.
    pub fn validate(&self, catalog: &Catalog) -> MixtureResult<()> {
        for ingredient in self.ingredients() {
            if !ingredient.mass.is_finite() {
                return Err(MixtureError::InvalidMass {
                    what: ingredient.name.clone(),
                    value: ingredient.mass,
                });
            }
            match &ingredient.item {
                Item::Substance(component) => {
                    catalog.lookup(component.substance_id.as_str())?;
                }
                Item::Mixture(mixture) => mixture.validate(catalog)?,
            }
        }
        Ok(())
    }

    pub fn is_valid(&self, catalog: &Catalog) -> bool {
        self.validate(catalog).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::Ingredient;

    fn mixture_of(parts: &[(&str, f64)]) -> Mixture {
        let mut mixture = Mixture::new();
        for (id, mass) in parts {
            mixture
                .add_ingredient(Ingredient::substance(*id, *mass))
                .unwrap();
        }
        mixture
    }

    #[test]
    fn empty_mixture_is_all_zero() {
        let catalog = Catalog::builtin();
        let props = Mixture::new().properties(&catalog).unwrap();
        assert_eq!(props.mass, 0.0);
        assert_eq!(props.volume, 0.0);
        assert_eq!(props.density, 0.0);
        assert_eq!(props.abv, 0.0);
        assert_eq!(props.brix, 0.0);
        assert_eq!(props.ph, 7.0);
    }

    #[test]
    fn water_has_unit_density() {
        let catalog = Catalog::builtin();
        let water = mixture_of(&[(ids::WATER, 250.0)]);
        assert!((water.density(&catalog).unwrap() - 1.0).abs() < 1e-12);
        assert!((water.volume(&catalog).unwrap() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn spirit_density_follows_curve() {
        let catalog = Catalog::builtin();
        let spirit = mixture_of(&[(ids::ETHANOL, 40.0), (ids::WATER, 60.0)]);
        let props = spirit.properties(&catalog).unwrap();
        assert!((props.density - 0.9352).abs() < 1e-9);
        assert!((props.abv - 47.41192).abs() < 1e-3);
    }

    #[test]
    fn curve_free_substance_interpolates() {
        let catalog = Catalog::builtin();
        // Glucose: w (1 + (1.54 - 1) w) + water's w
        let solution = mixture_of(&[(ids::GLUCOSE, 20.0), (ids::WATER, 80.0)]);
        let expected = 0.2 * (1.0 + 0.54 * 0.2) + 0.8;
        assert!((solution.density(&catalog).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn brix_weights_sweetness() {
        let catalog = Catalog::builtin();
        let syrup = mixture_of(&[(ids::SUCROSE, 50.0), (ids::WATER, 50.0)]);
        assert!((syrup.brix(&catalog).unwrap() - 50.0).abs() < 1e-9);

        let fructose = mixture_of(&[(ids::FRUCTOSE, 10.0), (ids::WATER, 90.0)]);
        assert!(fructose.brix(&catalog).unwrap() > 10.0);
    }

    #[test]
    fn kcal_sums_energy() {
        let catalog = Catalog::builtin();
        let spirit = mixture_of(&[(ids::ETHANOL, 10.0), (ids::WATER, 90.0)]);
        assert!((spirit.kcal(&catalog).unwrap() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn getters_agree_with_snapshot() {
        let catalog = Catalog::builtin();
        let drink = mixture_of(&[
            (ids::ETHANOL, 20.0),
            (ids::SUCROSE, 10.0),
            (ids::CITRIC_ACID, 1.0),
            (ids::WATER, 69.0),
        ]);
        let props = drink.properties(&catalog).unwrap();
        assert_eq!(props.abv, drink.abv(&catalog).unwrap());
        assert_eq!(props.brix, drink.brix(&catalog).unwrap());
        assert_eq!(props.ph, drink.ph(&catalog).unwrap());
        assert_eq!(props.volume, drink.volume(&catalog).unwrap());
        assert!(props.ph < 3.0);
    }

    #[test]
    fn unknown_substance_is_invalid() {
        let catalog = Catalog::builtin();
        let bad = mixture_of(&[("unobtainium", 1.0)]);
        assert!(!bad.is_valid(&catalog));
        assert!(matches!(
            bad.density(&catalog).unwrap_err(),
            MixtureError::Catalog(_)
        ));
    }

    #[test]
    fn edge_onto_empty_mixture_adds_no_material() {
        let catalog = Catalog::builtin();
        let mut drink = mixture_of(&[(ids::WATER, 100.0)]);
        drink
            .add_ingredient(Ingredient::mixture(Mixture::new(), 100.0))
            .unwrap();
        assert_eq!(drink.mass(), 200.0);

        let props = drink.properties(&catalog).unwrap();
        assert_eq!(props.mass, 100.0);
        assert!((props.density - 1.0).abs() < 1e-12);
        assert!((props.volume - 100.0).abs() < 1e-9);
        assert_eq!(props.brix, 0.0);
    }

    #[test]
    fn only_empty_sub_mixtures_give_zero_returns() {
        let catalog = Catalog::builtin();
        let mut shell = Mixture::new();
        shell
            .add_ingredient(Ingredient::mixture(Mixture::new(), 50.0))
            .unwrap();
        let props = shell.properties(&catalog).unwrap();
        assert_eq!(props.mass, 0.0);
        assert_eq!(props.density, 0.0);
        assert_eq!(props.volume, 0.0);
        assert_eq!(props.ph, 7.0);
    }

    #[test]
    fn remembered_mass_is_valid() {
        let catalog = Catalog::builtin();
        let mut drink = mixture_of(&[(ids::ETHANOL, 10.0), (ids::WATER, 90.0)]);
        let ethanol = drink.ingredients()[0].id.clone();
        drink.set_ingredient_mass(0.0, ethanol.as_str()).unwrap();
        assert!(drink.is_valid(&catalog));
        assert_eq!(drink.abv(&catalog).unwrap(), 0.0);
    }
}
