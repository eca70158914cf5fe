//! Float helpers shared by the mixture model and the solvers.

/// Masses below this are treated as zero (and re-encoded as ratio memory).
pub const ZERO_MASS_EPSILON: f64 = 1e-6;

/// Relative deviation of `actual` from `target`: `1 - target/actual`.
///
/// Zero when both are zero, one when only `actual` is zero. Positive when
/// `actual` overshoots the target.
pub fn deviation(actual: f64, target: f64) -> f64 {
    if actual == 0.0 {
        return if target == 0.0 { 0.0 } else { 1.0 };
    }
    1.0 - target / actual
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deviation_edge_cases() {
        assert_eq!(deviation(0.0, 0.0), 0.0);
        assert_eq!(deviation(0.0, 5.0), 1.0);
        assert_eq!(deviation(2.0, 2.0), 0.0);
        assert!((deviation(40.0, 50.0) + 0.25).abs() < 1e-12);
        assert!((deviation(50.0, 40.0) - 0.2).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn overshoot_is_positive(target in 0.1_f64..100.0, excess in 1.001_f64..10.0) {
            prop_assert!(deviation(target * excess, target) > 0.0);
            prop_assert!(deviation(target / excess, target) < 0.0);
        }
    }
}
