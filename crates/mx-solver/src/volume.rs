//! Volume/mass conversion by iterative rescaling.

use crate::config::VolumeConfig;
use crate::error::{SolverError, SolverResult};
use mx_catalog::Catalog;
use mx_core::{Mass, Volume, ZERO_MASS_EPSILON, grams, in_grams, in_ml};
use mx_mixture::Mixture;
use tracing::{debug, warn};

/// Total mass at which `mixture` fills `target`, keeping its proportions.
///
/// Fails on a non-positive target. Running out of rounds is not an error: it
/// returns `Ok(None)`. The caller's mixture is never touched.
///
/// Density depends only on weight fractions, which rescaling preserves, so the
/// first proportional rescale normally lands within tolerance. Later rounds
/// move the request by `(1 + overshoot) * residual`, accumulated across
/// rounds, and only absorb rounding left by that first step.
pub fn mass_for_volume(
    mixture: &Mixture,
    target: Volume,
    catalog: &Catalog,
    config: &VolumeConfig,
) -> SolverResult<Option<Mass>> {
    let target_ml = in_ml(target);
    if !target_ml.is_finite() || target_ml <= 0.0 {
        return Err(SolverError::InvalidVolume {
            volume_ml: target_ml,
        });
    }

    let mut trial = mixture.clone();
    let root = trial.id().clone();
    if trial.mass() < ZERO_MASS_EPSILON {
        trial.set_ingredient_mass(1.0, root.as_str())?;
    }

    let mut request = target_ml;
    for round in 0..config.max_rounds {
        let volume = trial.volume(catalog)?;
        if volume <= 0.0 {
            warn!(mixture = %root, "mixture has no volume to scale");
            return Ok(None);
        }

        let delta = target_ml - volume;
        if delta.abs() < config.tolerance {
            debug!(round, volume, "volume converged");
            return Ok(Some(grams(trial.mass())));
        }
        if round > 0 {
            request += (1.0 + config.overshoot) * delta;
        }
        debug!(round, volume, request, "rescaling mixture");

        let mass = trial.mass() * request / volume;
        if !mass.is_finite() || mass <= 0.0 {
            warn!(round, mass, "volume request left the physical range");
            return Ok(None);
        }
        trial.set_ingredient_mass(mass, root.as_str())?;
    }

    let volume = trial.volume(catalog)?;
    if (target_ml - volume).abs() < config.tolerance {
        return Ok(Some(grams(trial.mass())));
    }
    warn!(
        target_ml,
        volume,
        rounds = config.max_rounds,
        "volume fit did not converge"
    );
    Ok(None)
}

/// Rescale `mixture` in place so it fills `target`.
pub fn fit_volume(
    mixture: &mut Mixture,
    target: Volume,
    catalog: &Catalog,
    config: &VolumeConfig,
) -> SolverResult<()> {
    match mass_for_volume(mixture, target, catalog, config)? {
        Some(mass) => {
            let root = mixture.id().clone();
            mixture.set_ingredient_mass(in_grams(mass), root.as_str())?;
            Ok(())
        }
        None => Err(SolverError::ConvergenceFailed {
            what: format!("volume fit to {} mL", in_ml(target)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_catalog::ids;
    use mx_core::ml;
    use mx_mixture::Ingredient;

    fn water(mass: f64) -> Mixture {
        let mut mixture = Mixture::new();
        mixture
            .add_ingredient(Ingredient::substance(ids::WATER, mass))
            .unwrap();
        mixture
    }

    #[test]
    fn non_positive_target_fails() {
        let catalog = Catalog::builtin();
        let config = VolumeConfig::default();
        for target in [0.0, -10.0] {
            let err = mass_for_volume(&water(10.0), ml(target), &catalog, &config).unwrap_err();
            assert!(matches!(err, SolverError::InvalidVolume { .. }));
        }
    }

    #[test]
    fn water_mass_equals_volume() {
        let catalog = Catalog::builtin();
        let mass = mass_for_volume(&water(10.0), ml(250.0), &catalog, &VolumeConfig::default())
            .unwrap()
            .unwrap();
        assert!((in_grams(mass) - 250.0).abs() < 1e-3);
    }

    #[test]
    fn proportional_rescale_lands_in_one_round() {
        let catalog = Catalog::builtin();
        let mut spirit = Mixture::new();
        spirit
            .add_ingredient(Ingredient::substance(ids::ETHANOL, 40.0))
            .unwrap();
        spirit
            .add_ingredient(Ingredient::substance(ids::WATER, 60.0))
            .unwrap();
        let config = VolumeConfig {
            max_rounds: 1,
            tolerance: 1e-9,
            ..VolumeConfig::default()
        };
        let mass = mass_for_volume(&spirit, ml(50.0), &catalog, &config)
            .unwrap()
            .unwrap();
        assert!((in_grams(mass) - 50.0 * 0.9352).abs() < 1e-3);
    }

    #[test]
    fn input_is_not_mutated() {
        let catalog = Catalog::builtin();
        let original = water(10.0);
        let copy = original.clone();
        mass_for_volume(&original, ml(80.0), &catalog, &VolumeConfig::default()).unwrap();
        assert_eq!(original, copy);
    }

    #[test]
    fn zeroed_mixture_is_seeded() {
        let catalog = Catalog::builtin();
        let mut mixture = water(10.0);
        let root = mixture.id().clone();
        mixture.set_ingredient_mass(0.0, root.as_str()).unwrap();

        fit_volume(&mut mixture, ml(40.0), &catalog, &VolumeConfig::default()).unwrap();
        assert!((mixture.volume(&catalog).unwrap() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn empty_mixture_cannot_be_fitted() {
        let catalog = Catalog::builtin();
        let config = VolumeConfig::default();
        assert_eq!(
            mass_for_volume(&Mixture::new(), ml(10.0), &catalog, &config).unwrap(),
            None
        );
        let err = fit_volume(&mut Mixture::new(), ml(10.0), &catalog, &config).unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }
}
