//! Bracketed bisection.

use crate::error::{AcidBaseError, AcidBaseResult};

/// Bisection settings.
#[derive(Debug, Clone, Copy)]
pub struct BisectionConfig {
    /// Relative interval width at which the midpoint is accepted
    pub tolerance: f64,
    /// Hard cap on halvings
    pub max_iterations: usize,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 200,
        }
    }
}

/// Find a root of `f` in `[lo, hi]`.
///
/// The residuals at both ends must have opposite signs; otherwise the call fails
/// with [`AcidBaseError::Unbracketed`] instead of guessing.
pub fn bisect<F>(f: F, lo: f64, hi: f64, config: &BisectionConfig) -> AcidBaseResult<f64>
where
    F: Fn(f64) -> f64,
{
    let mut lo = lo;
    let mut hi = hi;
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(AcidBaseError::NonFinite {
            what: "residual at bracket end",
        });
    }
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo * f_hi > 0.0 {
        return Err(AcidBaseError::Unbracketed {
            what: format!("f({lo:e}) = {f_lo:e} and f({hi:e}) = {f_hi:e} share a sign"),
        });
    }

    let mut mid = 0.5 * (lo + hi);
    for _ in 0..config.max_iterations {
        mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(AcidBaseError::NonFinite {
                what: "residual at midpoint",
            });
        }
        if f_mid == 0.0 || (hi - lo) <= config.tolerance * mid {
            return Ok(mid);
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Ok(mid)
}
