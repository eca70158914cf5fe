//! mx-mixture: the recursive composition tree.
//!
//! A [`Mixture`] owns an ordered list of [`Ingredient`] edges, each pointing at
//! a catalog substance or a nested mixture. Physical properties are never
//! stored; they are recomputed from a fresh depth-first flatten against a
//! [`mx_catalog::Catalog`] passed by reference.
//!
//! # Example
//!
//! ```
//! use mx_catalog::{Catalog, ids};
//! use mx_mixture::{Ingredient, Mixture};
//!
//! let catalog = Catalog::builtin();
//! let mut spirit = Mixture::new();
//! spirit.add_ingredient(Ingredient::substance(ids::ETHANOL, 40.0)).unwrap();
//! spirit.add_ingredient(Ingredient::substance(ids::WATER, 60.0)).unwrap();
//!
//! let props = spirit.properties(&catalog).unwrap();
//! assert!((props.density - 0.9352).abs() < 1e-6);
//! ```

pub mod error;
pub mod flatten;
pub mod ingredient;
pub mod mixture;
pub mod presets;
pub mod properties;
pub mod serialize;

pub use error::{MixtureError, MixtureResult};
pub use flatten::{DecoratedSubstance, Substances};
pub use ingredient::{Ingredient, Item, SubstanceComponent};
pub use mixture::Mixture;
pub use presets::{citrus_juice, simple_syrup};
pub use properties::MixtureProperties;
pub use serialize::{
    SerializedIngredient, SerializedMixture, SerializedMixtureNode, SerializedNode,
    SerializedSubstanceNode,
};
