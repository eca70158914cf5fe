use mx_catalog::{Catalog, CitrusKind, ids};
use mx_mixture::{Ingredient, Mixture, SerializedMixture, citrus_juice, simple_syrup};
use proptest::prelude::*;

fn drink(ethanol: f64, water: f64, sugar: f64) -> Mixture {
    let mut mixture = Mixture::new();
    mixture
        .add_ingredient(Ingredient::substance(ids::ETHANOL, ethanol))
        .unwrap();
    mixture
        .add_ingredient(Ingredient::substance(ids::WATER, water))
        .unwrap();
    mixture
        .add_ingredient(Ingredient::substance(ids::SUCROSE, sugar))
        .unwrap();
    mixture
}

#[test]
fn fifty_brix_syrup_by_volume() {
    let catalog = Catalog::builtin();
    let mut syrup = simple_syrup(1.0, 1.0).unwrap();
    let root = syrup.id().clone();
    // 100 mL of a 1.2130 g/mL solution
    syrup.set_ingredient_mass(121.3, root.as_str()).unwrap();

    let props = syrup.properties(&catalog).unwrap();
    assert!((props.volume - 100.0).abs() < 1e-6);
    assert!((props.mass - 121.3).abs() < 0.1);
    assert!((props.equivalent_sugar_mass - 60.65).abs() < 0.1);
    assert!((props.brix - 50.0).abs() < 1e-9);
}

#[test]
fn json_round_trip_reproduces_properties() {
    let catalog = Catalog::builtin();
    let mut cocktail = drink(30.0, 40.0, 10.0);
    cocktail
        .add_ingredient(Ingredient::mixture(citrus_juice(CitrusKind::Lime), 25.0))
        .unwrap();

    let json = serde_json::to_string_pretty(&cocktail.to_serialized()).unwrap();
    assert!(json.contains("\"rootId\""));
    let data: SerializedMixture = serde_json::from_str(&json).unwrap();
    let back = Mixture::from_serialized(&data, &catalog).unwrap();

    let before = cocktail.properties(&catalog).unwrap();
    let after = back.properties(&catalog).unwrap();
    assert_eq!(before, after);
    assert_eq!(back, cocktail);
}

#[test]
fn parses_hand_written_json() {
    let catalog = Catalog::builtin();
    let json = r#"{
        "rootId": "m1",
        "nodes": [
            ["m1", { "id": "m1", "ingredients": [
                { "id": "e1", "mass": 40, "name": "Vodka" },
                { "id": "e2", "mass": 60, "name": "Water", "notes": "filtered" }
            ] }],
            ["e1", { "id": "ethanol" }],
            ["e2", { "id": "water" }]
        ]
    }"#;
    let data: SerializedMixture = serde_json::from_str(json).unwrap();
    let mixture = Mixture::from_serialized(&data, &catalog).unwrap();
    assert_eq!(mixture.ingredients().len(), 2);
    assert_eq!(mixture.ingredients()[1].notes, "filtered");
    assert!((mixture.density(&catalog).unwrap() - 0.9352).abs() < 1e-9);
}

#[test]
fn node_without_id_fails_to_parse() {
    let json = r#"{ "rootId": "m1", "nodes": [["m1", { "ingredients": [] }]] }"#;
    assert!(serde_json::from_str::<SerializedMixture>(json).is_err());
}

#[test]
fn nested_juice_lowers_ph() {
    let catalog = Catalog::builtin();
    let mut sour = drink(20.0, 50.0, 10.0);
    let base_ph = sour.ph(&catalog).unwrap();
    assert_eq!(base_ph, 7.0);

    sour.add_ingredient(Ingredient::mixture(citrus_juice(CitrusKind::Lemon), 30.0))
        .unwrap();
    let ph = sour.ph(&catalog).unwrap();
    assert!(ph > 2.0 && ph < 3.5, "pH = {ph}");
}

proptest! {
    #[test]
    fn clone_is_structurally_idempotent(e in 0.0_f64..100.0, w in 0.0_f64..100.0, s in 0.0_f64..50.0) {
        let original = drink(e, w, s);
        let copy = original.clone();
        prop_assert_eq!(&copy, &original);
        prop_assert_eq!(copy.clone(), copy);
    }

    #[test]
    fn mass_is_sum_of_active_edges(masses in proptest::collection::vec(0.0_f64..100.0, 1..8), zeroed in 0usize..8) {
        let mut mixture = Mixture::new();
        let mut edges = Vec::new();
        for mass in &masses {
            edges.push(mixture.add_ingredient(Ingredient::substance(ids::WATER, *mass)).unwrap());
        }
        let index = zeroed % edges.len();
        mixture.set_ingredient_mass(0.0, edges[index].as_str()).unwrap();

        let expected: f64 = masses
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, m)| *m)
            .sum();
        prop_assert!((mixture.mass() - expected).abs() < 1e-9);
    }

    #[test]
    fn more_ethanol_raises_abv(
        e in 0.5_f64..200.0,
        w in 1.0_f64..200.0,
        s in 0.0_f64..50.0,
        factor in 1.01_f64..3.0,
    ) {
        let catalog = Catalog::builtin();
        let low = drink(e, w, s).abv(&catalog).unwrap();
        let high = drink(e * factor, w, s).abv(&catalog).unwrap();
        prop_assert!(high > low);
    }
}
