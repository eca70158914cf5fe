//! What each top-level ingredient provides to the composition.

use mx_catalog::{Catalog, Substance, SubstanceId, ids};
use mx_mixture::{Ingredient, Item, Mixture, MixtureResult};
use std::collections::{BTreeSet, HashSet};

/// Role a substance plays when the solver adjusts masses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubstanceClass {
    Sweetener,
    Acid,
    Base,
    Water,
    Ethanol,
}

/// Classes provided by one top-level ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct Provision {
    pub ingredient_id: mx_core::IngredientId,
    pub classes: BTreeSet<SubstanceClass>,
}

fn classes_of(substance: &Substance, acids_present: &HashSet<&SubstanceId>) -> Vec<SubstanceClass> {
    let mut classes = Vec::new();
    if substance.is_sweetener() {
        classes.push(SubstanceClass::Sweetener);
    }
    if substance.is_acid() {
        classes.push(SubstanceClass::Acid);
    }
    if substance
        .conjugate_acid
        .as_ref()
        .is_some_and(|acid| acids_present.contains(acid))
    {
        classes.push(SubstanceClass::Base);
    }
    match substance.id.as_str() {
        ids::WATER => classes.push(SubstanceClass::Water),
        ids::ETHANOL => classes.push(SubstanceClass::Ethanol),
        _ => {}
    }
    classes
}

/// Acids occurring anywhere in the tree.
pub fn acids_present<'a>(
    mixture: &'a Mixture,
    catalog: &Catalog,
) -> MixtureResult<HashSet<&'a SubstanceId>> {
    let mut acids = HashSet::new();
    for substance in mixture.substances() {
        if catalog.lookup(substance.substance_id.as_str())?.is_acid() {
            acids.insert(substance.substance_id);
        }
    }
    Ok(acids)
}

fn provision_of(
    ingredient: &Ingredient,
    acids: &HashSet<&SubstanceId>,
    catalog: &Catalog,
) -> MixtureResult<BTreeSet<SubstanceClass>> {
    let mut classes = BTreeSet::new();
    match &ingredient.item {
        Item::Substance(component) => {
            let substance = catalog.lookup(component.substance_id.as_str())?;
            classes.extend(classes_of(substance, acids));
        }
        // A sub-mixture provides whatever its substances provide.
        Item::Mixture(nested) => {
            for decorated in nested.substances() {
                let substance = catalog.lookup(decorated.substance_id.as_str())?;
                classes.extend(classes_of(substance, acids));
            }
        }
    }
    Ok(classes)
}

/// Classify every top-level ingredient of `mixture`.
pub fn provisions(mixture: &Mixture, catalog: &Catalog) -> MixtureResult<Vec<Provision>> {
    let acids = acids_present(mixture, catalog)?;
    mixture
        .ingredients()
        .iter()
        .map(|ingredient| {
            Ok(Provision {
                ingredient_id: ingredient.id.clone(),
                classes: provision_of(ingredient, &acids, catalog)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_catalog::CitrusKind;
    use mx_mixture::citrus_juice;

    fn classes(mixture: &Mixture, index: usize) -> Vec<SubstanceClass> {
        let catalog = Catalog::builtin();
        provisions(mixture, &catalog).unwrap()[index]
            .classes
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn substances_are_classified() {
        let mut mixture = Mixture::new();
        for (id, mass) in [
            (ids::ETHANOL, 1.0),
            (ids::WATER, 1.0),
            (ids::SUCROSE, 1.0),
            (ids::CITRIC_ACID, 1.0),
            (ids::SODIUM_CITRATE, 1.0),
            (ids::SODIUM_CHLORIDE, 1.0),
        ] {
            mixture
                .add_ingredient(Ingredient::substance(id, mass))
                .unwrap();
        }
        assert_eq!(classes(&mixture, 0), vec![SubstanceClass::Ethanol]);
        assert_eq!(classes(&mixture, 1), vec![SubstanceClass::Water]);
        assert_eq!(classes(&mixture, 2), vec![SubstanceClass::Sweetener]);
        assert_eq!(classes(&mixture, 3), vec![SubstanceClass::Acid]);
        assert_eq!(classes(&mixture, 4), vec![SubstanceClass::Base]);
        assert!(classes(&mixture, 5).is_empty());
    }

    #[test]
    fn base_without_its_acid_is_inert() {
        let mut mixture = Mixture::new();
        mixture
            .add_ingredient(Ingredient::substance(ids::SODIUM_CITRATE, 1.0))
            .unwrap();
        assert!(classes(&mixture, 0).is_empty());
    }

    #[test]
    fn juice_provides_union() {
        let mut mixture = Mixture::new();
        mixture
            .add_ingredient(Ingredient::mixture(citrus_juice(CitrusKind::Lemon), 10.0))
            .unwrap();
        assert_eq!(
            classes(&mixture, 0),
            vec![
                SubstanceClass::Sweetener,
                SubstanceClass::Acid,
                SubstanceClass::Water
            ]
        );
    }
}
