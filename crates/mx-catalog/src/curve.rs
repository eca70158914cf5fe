//! Measured density-vs-concentration curves.

use crate::error::{CatalogError, CatalogResult};
use mx_core::constants::WATER_DENSITY_G_PER_ML;

/// Solution density [g/mL] of a binary substance/water solution as a function of
/// the substance weight fraction.
///
/// Points are strictly increasing in weight fraction and lie within [0, 1].
/// Evaluation is piecewise-linear and clamps outside the measured range.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    points: Vec<(f64, f64)>,
}

impl DensityCurve {
    /// Create a curve from `(weight_fraction, density)` points.
    pub fn new(points: Vec<(f64, f64)>) -> CatalogResult<Self> {
        if points.len() < 2 {
            return Err(CatalogError::InvalidCurve {
                what: "fewer than two points",
            });
        }
        for &(w, rho) in &points {
            if !w.is_finite() || !rho.is_finite() {
                return Err(CatalogError::InvalidCurve {
                    what: "non-finite point",
                });
            }
            if !(0.0..=1.0).contains(&w) {
                return Err(CatalogError::InvalidCurve {
                    what: "weight fraction outside [0, 1]",
                });
            }
            if rho <= 0.0 {
                return Err(CatalogError::InvalidCurve {
                    what: "non-positive density",
                });
            }
        }
        if points.windows(2).any(|pair| pair[1].0 <= pair[0].0) {
            return Err(CatalogError::InvalidCurve {
                what: "weight fractions not strictly increasing",
            });
        }
        Ok(Self { points })
    }

    /// Build from static table data without validation.
    pub(crate) fn from_table(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Interpolated solution density at weight fraction `w`.
    pub fn density_at(&self, w: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return WATER_DENSITY_G_PER_ML,
        };
        if w <= first.0 {
            return first.1;
        }
        if w >= last.0 {
            return last.1;
        }
        for pair in self.points.windows(2) {
            let (w0, rho0) = pair[0];
            let (w1, rho1) = pair[1];
            if w <= w1 {
                return rho0 + (rho1 - rho0) * (w - w0) / (w1 - w0);
            }
        }
        last.1
    }

    /// Density contribution of the substance at weight fraction `w`: the solution
    /// density minus the water it displaces.
    pub fn partial_density(&self, w: f64) -> f64 {
        let w = w.clamp(0.0, 1.0);
        self.density_at(w) - (1.0 - w) * WATER_DENSITY_G_PER_ML
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DensityCurve {
        DensityCurve::new(vec![(0.0, 1.0), (0.5, 0.9), (1.0, 0.8)]).unwrap()
    }

    #[test]
    fn interpolates_between_points() {
        let curve = sample();
        assert!((curve.density_at(0.25) - 0.95).abs() < 1e-12);
        assert!((curve.density_at(0.5) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_range() {
        let curve = DensityCurve::new(vec![(0.1, 0.99), (0.2, 0.98)]).unwrap();
        assert_eq!(curve.density_at(0.0), 0.99);
        assert_eq!(curve.density_at(0.9), 0.98);
    }

    #[test]
    fn partial_density_endpoints() {
        let curve = sample();
        assert!((curve.partial_density(0.0) - 0.0).abs() < 1e-12);
        assert!((curve.partial_density(1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn rejects_unsorted_points() {
        let result = DensityCurve::new(vec![(0.0, 1.0), (0.5, 0.9), (0.4, 0.95)]);
        assert!(matches!(result, Err(CatalogError::InvalidCurve { .. })));
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        let result = DensityCurve::new(vec![(0.0, 1.0), (1.5, 0.9)]);
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn density_stays_within_point_bounds(w in -0.5_f64..1.5_f64) {
            let curve = DensityCurve::new(vec![(0.0, 1.0), (0.4, 0.9352), (1.0, 0.789)]).unwrap();
            let rho = curve.density_at(w);
            prop_assert!((0.789..=1.0).contains(&rho));
        }
    }
}
