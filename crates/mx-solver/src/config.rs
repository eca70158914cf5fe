//! Solver settings. Every field has a default, so partial YAML files load.

use serde::{Deserialize, Serialize};

/// Simulated annealing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    pub max_iterations: usize,
    pub initial_temperature: f64,
    /// Temperature reached after `max_iterations` of geometric cooling
    pub final_temperature: f64,
    /// Seed of the Metropolis acceptance draws
    pub seed: u64,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            initial_temperature: 1.0,
            final_temperature: 0.01,
            seed: 42,
        }
    }
}

impl AnnealConfig {
    /// Per-iteration cooling factor.
    pub fn cooling_rate(&self) -> f64 {
        if self.max_iterations == 0 || self.initial_temperature <= 0.0 {
            return 1.0;
        }
        (self.final_temperature / self.initial_temperature).powf(1.0 / self.max_iterations as f64)
    }
}

/// Volume/mass conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Accepted |volume - target| [mL]
    pub tolerance: f64,
    pub max_rounds: usize,
    /// Extra correction applied to the request after a missed round
    pub overshoot: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_rounds: 10,
            overshoot: 0.1,
        }
    }
}

/// Composition solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub anneal: AnnealConfig,
    pub volume: VolumeConfig,
    /// Fraction of each deviation corrected per move
    pub damping: f64,
    /// Error below which the search stops early
    pub tolerance: f64,
    /// The result fails when its error exceeds `failure_factor * tolerance`
    pub failure_factor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            anneal: AnnealConfig::default(),
            volume: VolumeConfig::default(),
            damping: 0.5,
            tolerance: 1e-4,
            failure_factor: 10.0,
        }
    }
}

impl SolverConfig {
    pub fn failure_threshold(&self) -> f64 {
        self.tolerance * self.failure_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooling_reaches_final_temperature() {
        let config = AnnealConfig::default();
        let mut t = config.initial_temperature;
        for _ in 0..config.max_iterations {
            t *= config.cooling_rate();
        }
        assert!((t - config.final_temperature).abs() < 1e-12);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: SolverConfig = serde_yaml::from_str("damping: 0.25\nanneal:\n  seed: 7\n").unwrap();
        assert_eq!(config.damping, 0.25);
        assert_eq!(config.anneal.seed, 7);
        assert_eq!(config.anneal.max_iterations, 100);
        assert_eq!(config.volume, VolumeConfig::default());
        assert_eq!(config.tolerance, 1e-4);
    }
}
