//! Requested properties.

use crate::error::{SolverError, SolverResult};
use mx_core::{Volume, in_ml};
use mx_mixture::MixtureProperties;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub volume: Volume,
    /// [%]
    pub abv: f64,
    /// [%]
    pub brix: f64,
    pub ph: f64,
}

impl Targets {
    pub fn new(volume: Volume, abv: f64, brix: f64, ph: f64) -> Self {
        Self {
            volume,
            abv,
            brix,
            ph,
        }
    }

    /// Targets equal to a mixture's current properties.
    pub fn from_properties(properties: &MixtureProperties) -> Self {
        Self::new(
            mx_core::ml(properties.volume),
            properties.abv,
            properties.brix,
            properties.ph,
        )
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_abv(mut self, abv: f64) -> Self {
        self.abv = abv;
        self
    }

    pub fn with_brix(mut self, brix: f64) -> Self {
        self.brix = brix;
        self
    }

    pub fn with_ph(mut self, ph: f64) -> Self {
        self.ph = ph;
        self
    }

    pub fn volume_ml(&self) -> f64 {
        in_ml(self.volume)
    }

    /// [H+] the target pH implies [mol/L].
    pub fn h_molarity(&self) -> f64 {
        10f64.powf(-self.ph)
    }

    /// Moles of H+ in the target volume.
    pub fn moles_h(&self) -> f64 {
        self.h_molarity() * self.volume_ml() / 1000.0
    }

    pub fn validate(&self) -> SolverResult<()> {
        let volume = self.volume_ml();
        if !volume.is_finite() || volume <= 0.0 {
            return Err(SolverError::InvalidTarget {
                what: "volume",
                value: volume,
            });
        }
        check_range("abv", self.abv, 0.0, 100.0)?;
        check_range("brix", self.brix, 0.0, 100.0)?;
        check_range("ph", self.ph, 0.0, 7.0)
    }
}

fn check_range(what: &'static str, value: f64, low: f64, high: f64) -> SolverResult<()> {
    if value.is_finite() && (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(SolverError::InvalidTarget { what, value })
    }
}
