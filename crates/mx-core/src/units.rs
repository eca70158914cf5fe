// mx-core/src/units.rs

use uom::si::f64::{Mass as UomMass, MassDensity as UomMassDensity, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;
pub type Volume = UomVolume;
pub type Density = UomMassDensity;

#[inline]
pub fn grams(v: f64) -> Mass {
    use uom::si::mass::gram;
    Mass::new::<gram>(v)
}

#[inline]
pub fn ml(v: f64) -> Volume {
    use uom::si::volume::milliliter;
    Volume::new::<milliliter>(v)
}

#[inline]
pub fn g_per_ml(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

#[inline]
pub fn in_grams(m: Mass) -> f64 {
    use uom::si::mass::gram;
    m.get::<gram>()
}

#[inline]
pub fn in_ml(v: Volume) -> f64 {
    use uom::si::volume::milliliter;
    v.get::<milliliter>()
}

#[inline]
pub fn in_g_per_ml(d: Density) -> f64 {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    d.get::<gram_per_cubic_centimeter>()
}

pub mod constants {
    /// Reference density of water [g/mL].
    pub const WATER_DENSITY_G_PER_ML: f64 = 1.0;
    /// Ionic product of water at 25 °C.
    pub const KW: f64 = 1e-14;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_round_trip() {
        assert!((in_grams(grams(121.3)) - 121.3).abs() < 1e-9);
        assert!((in_ml(ml(50.0)) - 50.0).abs() < 1e-9);
        assert!((in_g_per_ml(g_per_ml(0.9352)) - 0.9352).abs() < 1e-12);
    }

    #[test]
    fn mass_over_volume_is_density() {
        let rho: Density = grams(93.52) / ml(100.0);
        assert!((in_g_per_ml(rho) - 0.9352).abs() < 1e-9);
    }
}
