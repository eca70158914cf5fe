//! Polyprotic charge-balance equilibrium.

use crate::bisection::{BisectionConfig, bisect};
use crate::error::{AcidBaseError, AcidBaseResult};
use mx_catalog::{Catalog, CitrusKind, SubstanceId};
use mx_core::constants::KW;

/// pH of a solution without any acid group.
pub const NEUTRAL_PH: f64 = 7.0;

/// Bracket for [H+] in mol/L.
const H_MIN: f64 = 1e-14;
const H_MAX: f64 = 1.0;

/// One dissolved substance as seen by the equilibrium solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Solute {
    pub substance_id: SubstanceId,
    /// Absolute mass [g]
    pub mass: f64,
    /// Citrus juice whose subtree holds this substance, if any
    pub citrus: Option<CitrusKind>,
}

impl Solute {
    pub fn new(substance_id: impl Into<SubstanceId>, mass: f64) -> Self {
        Self {
            substance_id: substance_id.into(),
            mass,
            citrus: None,
        }
    }

    pub fn in_citrus(mut self, kind: CitrusKind) -> Self {
        self.citrus = Some(kind);
        self
    }
}

/// An acid together with any of its conjugate bases present in the solution.
#[derive(Debug, Clone, PartialEq)]
pub struct AcidGroup {
    pub acid: SubstanceId,
    pub pka: Vec<f64>,
    /// Free acid [mol/L], after any citrus correction
    pub acid_molarity: f64,
    /// Conjugate base [mol/L], before activity correction
    pub base_molarity: f64,
}

impl AcidGroup {
    /// Charge of the fully deprotonated base.
    pub fn max_charge(&self) -> usize {
        self.pka.len()
    }

    pub fn ionic_strength(&self) -> f64 {
        self.acid_molarity + self.max_charge() as f64 * self.base_molarity
    }

    /// Simplified Debye-Hückel estimate, clamped at zero.
    pub fn activity_coefficient(&self) -> f64 {
        (1.0 - 0.5 * self.ionic_strength().sqrt()).max(0.0)
    }

    pub fn effective_base_molarity(&self) -> f64 {
        self.base_molarity * self.activity_coefficient()
    }

    /// All species of the acid [mol/L].
    pub fn total_molarity(&self) -> f64 {
        self.acid_molarity + self.effective_base_molarity()
    }

    /// Charge-balance residual at [H+] = `h`: positive charge minus negative charge.
    pub fn residual(&self, h: f64) -> f64 {
        let base = self.effective_base_molarity();
        let total = self.total_molarity();

        // term_i = Ka_1 * .. * Ka_i / h^i
        let mut term = 1.0;
        let mut denominator = 1.0;
        let mut charged = 0.0;
        for (i, pka) in self.pka.iter().enumerate() {
            term *= 10f64.powf(-pka) / h;
            denominator += term;
            charged += (i + 1) as f64 * term;
        }

        let positive = h + self.max_charge() as f64 * base;
        let negative = KW / h + total * charged / denominator;
        positive - negative
    }

    /// Solve this group's charge balance for [H+].
    pub fn solve_h(&self, config: &BisectionConfig) -> AcidBaseResult<f64> {
        if self.pka.is_empty() {
            return Err(AcidBaseError::InvalidPka {
                what: "acid group without pKa values",
            });
        }
        if self.acid_molarity <= 0.0 && self.base_molarity <= 0.0 {
            return Err(AcidBaseError::Unbracketed {
                what: format!("group {} holds neither acid nor base", self.acid),
            });
        }
        bisect(|h| self.residual(h), H_MIN, H_MAX, config)
    }
}

/// Result of a pH solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhSolution {
    pub ph: f64,
    /// Summed [H+] over all acid groups [mol/L]
    pub h_molarity: f64,
    /// Moles of H+ in the whole volume
    pub total_moles_h: f64,
}

impl PhSolution {
    pub fn neutral(volume_ml: f64) -> Self {
        let h = 10f64.powf(-NEUTRAL_PH);
        Self {
            ph: NEUTRAL_PH,
            h_molarity: h,
            total_moles_h: h * volume_ml.max(0.0) / 1000.0,
        }
    }
}

/// Solve one polyprotic acid with its conjugate base for [H+].
///
/// Fails when both concentrations are zero: there is nothing to balance.
pub fn solve_polyprotic(
    pka: &[f64],
    acid_molarity: f64,
    base_molarity: f64,
) -> AcidBaseResult<f64> {
    let group = AcidGroup {
        acid: SubstanceId::new("acid"),
        pka: pka.to_vec(),
        acid_molarity,
        base_molarity,
    };
    group.solve_h(&BisectionConfig::default())
}

/// Group solutes by acid and convert masses to molarities in `volume_ml`.
///
/// Acids (substances with pKa values) form groups; registered conjugate bases
/// join their acid's group. Bases whose acid is absent are ignored.
pub fn group_solutes(
    volume_ml: f64,
    solutes: &[Solute],
    catalog: &Catalog,
) -> AcidBaseResult<Vec<AcidGroup>> {
    let liters = volume_ml / 1000.0;
    let mut groups: Vec<AcidGroup> = Vec::new();

    for solute in solutes.iter().filter(|s| s.mass > 0.0) {
        let substance = catalog.lookup(solute.substance_id.as_str())?;
        if !substance.is_acid() {
            continue;
        }
        let free_fraction = solute
            .citrus
            .map(|kind| 1.0 - kind.dissociation())
            .unwrap_or(1.0);
        let molarity = substance.moles(solute.mass) / liters * free_fraction;

        match groups.iter_mut().find(|g| g.acid == substance.id) {
            Some(group) => group.acid_molarity += molarity,
            None => groups.push(AcidGroup {
                acid: substance.id.clone(),
                pka: substance.pka.clone(),
                acid_molarity: molarity,
                base_molarity: 0.0,
            }),
        }
    }

    for solute in solutes.iter().filter(|s| s.mass > 0.0) {
        let substance = catalog.lookup(solute.substance_id.as_str())?;
        let Some(acid) = &substance.conjugate_acid else {
            continue;
        };
        if let Some(group) = groups.iter_mut().find(|g| &g.acid == acid) {
            group.base_molarity += substance.moles(solute.mass) / liters;
        }
    }

    Ok(groups)
}

/// Solve the pH of `solutes` dissolved in `volume_ml` millilitres.
///
/// Without any acid the solution is neutral. Any group whose charge balance has
/// no bracketed root fails the whole call.
pub fn solve_ph(volume_ml: f64, solutes: &[Solute], catalog: &Catalog) -> AcidBaseResult<PhSolution> {
    if !volume_ml.is_finite() || volume_ml < 0.0 {
        return Err(AcidBaseError::InvalidVolume { volume_ml });
    }
    if !solutes.iter().any(|s| s.mass > 0.0) {
        return Ok(PhSolution::neutral(volume_ml));
    }
    if volume_ml == 0.0 {
        return Err(AcidBaseError::InvalidVolume { volume_ml });
    }

    let groups = group_solutes(volume_ml, solutes, catalog)?;
    if groups.is_empty() {
        return Ok(PhSolution::neutral(volume_ml));
    }

    let config = BisectionConfig::default();
    let mut total_h = 0.0;
    for group in &groups {
        let h = group.solve_h(&config)?;
        tracing::trace!(acid = %group.acid, h, "solved acid group");
        total_h += h;
    }

    if total_h <= 0.0 {
        return Ok(PhSolution::neutral(volume_ml));
    }

    Ok(PhSolution {
        ph: -total_h.log10(),
        h_molarity: total_h,
        total_moles_h: total_h * volume_ml / 1000.0,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn more_acid_never_raises_ph(c in 1e-4_f64..0.5, extra in 1.01_f64..10.0) {
            let h_low = solve_polyprotic(&[3.13, 4.76, 6.40], c, 0.0).unwrap();
            let h_high = solve_polyprotic(&[3.13, 4.76, 6.40], c * extra, 0.0).unwrap();
            prop_assert!(h_high >= h_low);
        }

        #[test]
        fn weak_acid_ph_is_finite_and_acidic(c in 1e-5_f64..1.0) {
            let h = solve_polyprotic(&[4.76], c, 0.0).unwrap();
            let ph = -h.log10();
            prop_assert!(ph.is_finite());
            prop_assert!(ph > 0.0 && ph < 7.0);
        }
    }
}
