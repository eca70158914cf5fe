//! Well-known substance ids of the built-in catalog.

pub const WATER: &str = "water";
pub const ETHANOL: &str = "ethanol";
pub const SUCROSE: &str = "sucrose";
pub const GLUCOSE: &str = "glucose";
pub const FRUCTOSE: &str = "fructose";
pub const CITRIC_ACID: &str = "citric-acid";
pub const SODIUM_CITRATE: &str = "sodium-citrate";
pub const MALIC_ACID: &str = "malic-acid";
pub const TARTARIC_ACID: &str = "tartaric-acid";
pub const LACTIC_ACID: &str = "lactic-acid";
pub const ACETIC_ACID: &str = "acetic-acid";
pub const SODIUM_ACETATE: &str = "sodium-acetate";
pub const PHOSPHORIC_ACID: &str = "phosphoric-acid";
pub const SODIUM_CHLORIDE: &str = "sodium-chloride";
