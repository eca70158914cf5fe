//! Substance registry and the built-in beverage catalog.

use crate::curve::DensityCurve;
use crate::error::{CatalogError, CatalogResult};
use crate::ids;
use crate::substance::{Substance, SubstanceId};
use std::collections::HashMap;

/// Ethanol/water solution density [g/mL] by ethanol weight fraction.
const ETHANOL_CURVE: [(f64, f64); 11] = [
    (0.0, 1.0),
    (0.1, 0.9819),
    (0.2, 0.9687),
    (0.3, 0.9539),
    (0.4, 0.9352),
    (0.5, 0.9139),
    (0.6, 0.8911),
    (0.7, 0.8676),
    (0.8, 0.8434),
    (0.9, 0.8180),
    (1.0, 0.789),
];

/// Sucrose/water solution density [g/mL] by sucrose weight fraction.
const SUCROSE_CURVE: [(f64, f64); 11] = [
    (0.0, 1.0),
    (0.1, 1.0381),
    (0.2, 1.0790),
    (0.3, 1.1220),
    (0.4, 1.1665),
    (0.5, 1.2130),
    (0.6, 1.2620),
    (0.7, 1.3140),
    (0.8, 1.3690),
    (0.9, 1.4270),
    (1.0, 1.587),
];

/// Entries of the built-in catalog.
pub fn builtin_substances() -> Vec<Substance> {
    vec![
        Substance::new(ids::WATER, "Water", 1.0, 18.015).with_aliases(&["h2o"]),
        Substance::new(ids::ETHANOL, "Ethanol", 0.789, 46.068)
            .with_aliases(&["alcohol", "etoh"])
            .with_kcal_per_gram(7.0)
            .with_density_curve(DensityCurve::from_table(&ETHANOL_CURVE)),
        Substance::new(ids::SUCROSE, "Sucrose", 1.587, 342.297)
            .with_aliases(&["sugar", "table sugar"])
            .with_sweetness(1.0)
            .with_kcal_per_gram(3.87)
            .with_density_curve(DensityCurve::from_table(&SUCROSE_CURVE)),
        Substance::new(ids::GLUCOSE, "Glucose", 1.54, 180.156)
            .with_aliases(&["dextrose"])
            .with_sweetness(0.74)
            .with_kcal_per_gram(3.75),
        Substance::new(ids::FRUCTOSE, "Fructose", 1.694, 180.156)
            .with_aliases(&["fruit sugar"])
            .with_sweetness(1.73)
            .with_kcal_per_gram(3.75),
        Substance::new(ids::CITRIC_ACID, "Citric Acid", 1.665, 192.124)
            .with_pka(&[3.13, 4.76, 6.40])
            .with_kcal_per_gram(2.47),
        Substance::new(ids::SODIUM_CITRATE, "Sodium Citrate", 1.7, 294.10)
            .with_aliases(&["trisodium citrate"])
            .conjugate_base_of(ids::CITRIC_ACID),
        Substance::new(ids::MALIC_ACID, "Malic Acid", 1.609, 134.087)
            .with_pka(&[3.40, 5.20])
            .with_kcal_per_gram(2.39),
        Substance::new(ids::TARTARIC_ACID, "Tartaric Acid", 1.79, 150.087)
            .with_pka(&[2.89, 4.40])
            .with_kcal_per_gram(2.0),
        Substance::new(ids::LACTIC_ACID, "Lactic Acid", 1.209, 90.078)
            .with_pka(&[3.86])
            .with_kcal_per_gram(3.62),
        Substance::new(ids::ACETIC_ACID, "Acetic Acid", 1.049, 60.052)
            .with_aliases(&["vinegar acid"])
            .with_pka(&[4.76])
            .with_kcal_per_gram(3.5),
        Substance::new(ids::SODIUM_ACETATE, "Sodium Acetate", 1.528, 82.034)
            .conjugate_base_of(ids::ACETIC_ACID),
        Substance::new(ids::PHOSPHORIC_ACID, "Phosphoric Acid", 1.885, 97.994)
            .with_pka(&[2.15, 7.20, 12.35]),
        Substance::new(ids::SODIUM_CHLORIDE, "Sodium Chloride", 2.165, 58.44)
            .with_aliases(&["salt"]),
    ]
}

/// Immutable substance registry with acid/conjugate-base adjacency.
#[derive(Debug, Clone)]
pub struct Catalog {
    substances: Vec<Substance>,
    index: HashMap<SubstanceId, usize>,
    bases_by_acid: HashMap<SubstanceId, Vec<SubstanceId>>,
}

impl Catalog {
    /// Build a catalog, validating ids, physical constants, curves and
    /// conjugate links.
    pub fn new(substances: Vec<Substance>) -> CatalogResult<Self> {
        let catalog = Self::assemble(substances)?;

        for substance in &catalog.substances {
            let id = substance.id.to_string();
            if !(substance.pure_density > 0.0) {
                return Err(CatalogError::NonPhysical {
                    id,
                    what: "pure density",
                });
            }
            if !(substance.molecular_mass > 0.0) {
                return Err(CatalogError::NonPhysical {
                    id,
                    what: "molecular mass",
                });
            }
            if substance.sweetness < 0.0 || substance.kcal_per_gram < 0.0 {
                return Err(CatalogError::NonPhysical {
                    id,
                    what: "sweetness or energy",
                });
            }
            if let Some(curve) = &substance.density_curve {
                DensityCurve::new(curve.points().to_vec())?;
            }
            if let Some(acid) = &substance.conjugate_acid {
                let valid = catalog.get(acid.as_str()).is_some_and(Substance::is_acid);
                if !valid {
                    return Err(CatalogError::InvalidConjugate {
                        base: id,
                        acid: acid.to_string(),
                    });
                }
            }
        }

        Ok(catalog)
    }

    /// The built-in catalog of common beverage substances.
    pub fn builtin() -> Self {
        // Table data is covered by `builtin_catalog_validates`.
        Self::assemble_or_empty(builtin_substances())
    }

    /// Index a fixed table, logging and falling back to an empty catalog
    /// when the table is inconsistent.
    fn assemble_or_empty(substances: Vec<Substance>) -> Self {
        match Self::assemble(substances) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(%err, "substance table rejected, using an empty catalog");
                Self::empty()
            }
        }
    }

    pub fn empty() -> Self {
        Self {
            substances: Vec::new(),
            index: HashMap::new(),
            bases_by_acid: HashMap::new(),
        }
    }

    fn assemble(substances: Vec<Substance>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(substances.len());
        let mut bases_by_acid: HashMap<SubstanceId, Vec<SubstanceId>> = HashMap::new();

        for (i, substance) in substances.iter().enumerate() {
            if index.insert(substance.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSubstance {
                    id: substance.id.to_string(),
                });
            }
            if let Some(acid) = &substance.conjugate_acid {
                bases_by_acid
                    .entry(acid.clone())
                    .or_default()
                    .push(substance.id.clone());
            }
        }

        Ok(Self {
            substances,
            index,
            bases_by_acid,
        })
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substance> + '_ {
        self.substances.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Substance> {
        self.index.get(id).map(|&i| &self.substances[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a substance, failing on unknown ids.
    pub fn lookup(&self, id: &str) -> CatalogResult<&Substance> {
        self.get(id).ok_or_else(|| CatalogError::UnknownSubstance { id: id.to_string() })
    }

    /// Conjugate bases registered for `acid` (empty when none).
    pub fn conjugate_bases_of(&self, acid: &str) -> &[SubstanceId] {
        self.bases_by_acid
            .get(acid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The acid a conjugate base belongs to.
    pub fn conjugate_acid_of(&self, base: &str) -> Option<&SubstanceId> {
        self.get(base).and_then(|s| s.conjugate_acid.as_ref())
    }

    pub fn is_conjugate_base_of(&self, base: &str, acid: &str) -> bool {
        self.conjugate_acid_of(base)
            .is_some_and(|linked| linked.as_str() == acid)
    }

    /// Substances whose id, name or aliases contain `query` (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<&Substance> {
        self.substances
            .iter()
            .filter(|substance| substance.matches_query(query))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
