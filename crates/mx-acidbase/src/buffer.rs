//! Buffer capacity (Van Slyke).

use crate::equilibrium::AcidGroup;
use mx_core::constants::KW;
use std::f64::consts::LN_10;

/// Van Slyke buffer capacity [mol/(L·pH)] at [H+] = `h`.
///
/// Sums the contributions of water and of every dissociation step of every
/// acid group: `ln10 * (Kw/h + h + Σ C·Ka·h / (Ka + h)²)`.
pub fn buffer_capacity(h: f64, groups: &[AcidGroup]) -> f64 {
    if h <= 0.0 {
        return 0.0;
    }
    let mut sum = KW / h + h;
    for group in groups {
        let total = group.total_molarity();
        for pka in &group.pka {
            let ka = 10f64.powf(-pka);
            sum += total * ka * h / (ka + h).powi(2);
        }
    }
    LN_10 * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_catalog::SubstanceId;

    fn acetate(total: f64) -> AcidGroup {
        AcidGroup {
            acid: SubstanceId::new("acetic-acid"),
            pka: vec![4.76],
            acid_molarity: total,
            base_molarity: 0.0,
        }
    }

    #[test]
    fn pure_water_minimum_at_neutral() {
        let beta = buffer_capacity(1e-7, &[]);
        assert!((beta - LN_10 * 2e-7).abs() < 1e-15);
    }

    #[test]
    fn peaks_at_pka() {
        let group = acetate(0.1);
        let at_pka = buffer_capacity(10f64.powf(-4.76), std::slice::from_ref(&group));
        let off_pka = buffer_capacity(10f64.powf(-3.76), std::slice::from_ref(&group));
        assert!(at_pka > off_pka);
        // C·ln10/4 at the pKa
        assert!((at_pka - 0.1 * LN_10 / 4.0).abs() < 1e-3);
    }

    #[test]
    fn zero_h_has_no_capacity() {
        assert_eq!(buffer_capacity(0.0, &[acetate(0.1)]), 0.0);
    }
}
