//! Substance definitions.

use crate::curve::DensityCurve;
use core::borrow::Borrow;
use core::fmt;
use mx_core::constants::WATER_DENSITY_G_PER_ML;
use serde::{Deserialize, Serialize};

/// Catalog key of a substance (e.g. `"ethanol"`, `"citric-acid"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstanceId(String);

impl SubstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SubstanceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubstanceId({})", self.0)
    }
}

impl fmt::Display for SubstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubstanceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Substance {
    pub id: SubstanceId,
    pub name: String,
    pub aliases: Vec<String>,
    /// Density of the pure substance [g/mL]
    pub pure_density: f64,
    /// Molecular mass [g/mol]
    pub molecular_mass: f64,
    /// Acid dissociation constants, first proton first
    pub pka: Vec<f64>,
    /// Sweetness relative to sucrose (= 1)
    pub sweetness: f64,
    pub kcal_per_gram: f64,
    pub density_curve: Option<DensityCurve>,
    /// Set on a conjugate base: the acid it is the base of
    pub conjugate_acid: Option<SubstanceId>,
}

impl Substance {
    pub fn new(id: &str, name: &str, pure_density: f64, molecular_mass: f64) -> Self {
        Self {
            id: SubstanceId::new(id),
            name: name.to_string(),
            aliases: Vec::new(),
            pure_density,
            molecular_mass,
            pka: Vec::new(),
            sweetness: 0.0,
            kcal_per_gram: 0.0,
            density_curve: None,
            conjugate_acid: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        self
    }

    pub fn with_pka(mut self, pka: &[f64]) -> Self {
        self.pka = pka.to_vec();
        self
    }

    pub fn with_sweetness(mut self, sweetness: f64) -> Self {
        self.sweetness = sweetness;
        self
    }

    pub fn with_kcal_per_gram(mut self, kcal: f64) -> Self {
        self.kcal_per_gram = kcal;
        self
    }

    pub fn with_density_curve(mut self, curve: DensityCurve) -> Self {
        self.density_curve = Some(curve);
        self
    }

    pub fn conjugate_base_of(mut self, acid: &str) -> Self {
        self.conjugate_acid = Some(SubstanceId::new(acid));
        self
    }

    pub fn is_acid(&self) -> bool {
        !self.pka.is_empty()
    }

    pub fn is_sweetener(&self) -> bool {
        self.sweetness > 0.0
    }

    /// Moles contained in `mass` grams.
    pub fn moles(&self, mass: f64) -> f64 {
        if self.molecular_mass > 0.0 {
            mass / self.molecular_mass
        } else {
            0.0
        }
    }

    /// Density contribution at weight fraction `w` within a mixture.
    ///
    /// Uses the measured curve when available, otherwise interpolates linearly
    /// between water's reference density and the pure density.
    pub fn partial_density(&self, w: f64) -> f64 {
        match &self.density_curve {
            Some(curve) => curve.partial_density(w),
            None => {
                let w = w.clamp(0.0, 1.0);
                w * (WATER_DENSITY_G_PER_ML + (self.pure_density - WATER_DENSITY_G_PER_ML) * w)
            }
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.as_str().to_ascii_lowercase().contains(&query)
            || self.name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}
