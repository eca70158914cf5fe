//! Ready-made mixtures.

use crate::error::{MixtureError, MixtureResult};
use crate::ingredient::Ingredient;
use crate::mixture::Mixture;
use mx_catalog::{CitrusKind, ids};
use mx_core::Id;

/// Grams per 100 g of juice: citric, malic, glucose, fructose, sucrose.
fn juice_solids(kind: CitrusKind) -> [f64; 5] {
    match kind {
        CitrusKind::Lemon => [4.8, 0.3, 1.0, 1.0, 0.5],
        CitrusKind::Lime => [5.5, 0.2, 0.7, 0.7, 0.3],
        CitrusKind::Orange => [0.9, 0.15, 2.2, 2.4, 3.9],
        CitrusKind::Grapefruit => [1.6, 0.1, 2.0, 2.2, 2.0],
    }
}

/// 100 g of fresh juice. The id carries the fruit's prefix so the acid
/// correction applies wherever the juice is nested.
pub fn citrus_juice(kind: CitrusKind) -> Mixture {
    let [citric, malic, glucose, fructose, sucrose] = juice_solids(kind);
    let water = 100.0 - citric - malic - glucose - fructose - sucrose;

    let ingredients = vec![
        Ingredient::substance(ids::WATER, water).with_name("Water"),
        Ingredient::substance(ids::CITRIC_ACID, citric).with_name("Citric Acid"),
        Ingredient::substance(ids::MALIC_ACID, malic).with_name("Malic Acid"),
        Ingredient::substance(ids::GLUCOSE, glucose).with_name("Glucose"),
        Ingredient::substance(ids::FRUCTOSE, fructose).with_name("Fructose"),
        Ingredient::substance(ids::SUCROSE, sucrose).with_name("Sucrose"),
    ];
    Mixture::from_parts(Id::mint_with_prefix(kind.id_prefix()), ingredients)
}

/// Sucrose and water by mass parts, e.g. `simple_syrup(1.0, 1.0)` for 1:1.
pub fn simple_syrup(sugar_parts: f64, water_parts: f64) -> MixtureResult<Mixture> {
    for (what, value) in [("sugar parts", sugar_parts), ("water parts", water_parts)] {
        if !value.is_finite() || value < 0.0 {
            return Err(MixtureError::InvalidMass {
                what: what.to_string(),
                value,
            });
        }
    }
    let mut syrup = Mixture::with_id(Id::mint_with_prefix("simple-syrup"));
    syrup.add_ingredient(Ingredient::substance(ids::SUCROSE, sugar_parts).with_name("Sugar"))?;
    syrup.add_ingredient(Ingredient::substance(ids::WATER, water_parts).with_name("Water"))?;
    Ok(syrup)
}
