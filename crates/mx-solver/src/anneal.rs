//! Generic simulated annealing with Metropolis acceptance.

use crate::config::AnnealConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// A search space the annealer can walk.
pub trait AnnealProblem {
    type State: Clone;
    type Error;

    /// Lower is better.
    fn energy(&self, state: &Self::State) -> f64;

    /// Propose a move from `state`. `temperature` runs from the initial to the
    /// final temperature and may be used to shrink the step. `None` means no
    /// move could be built this iteration.
    fn neighbor(
        &self,
        state: &Self::State,
        temperature: f64,
    ) -> Result<Option<Self::State>, Self::Error>;
}

/// Outcome of one annealing run.
#[derive(Debug, Clone)]
pub struct AnnealOutcome<S> {
    pub best: S,
    pub best_energy: f64,
    pub last: S,
    pub last_energy: f64,
    /// Iterations performed
    pub iterations: usize,
}

impl<S> AnnealOutcome<S> {
    /// The lower-energy of the best and the final state.
    pub fn into_better(self) -> (S, f64) {
        if self.last_energy < self.best_energy {
            (self.last, self.last_energy)
        } else {
            (self.best, self.best_energy)
        }
    }
}

pub struct Annealer {
    config: AnnealConfig,
    stop_below: f64,
}

impl Annealer {
    pub fn new(config: AnnealConfig) -> Self {
        Self {
            config,
            stop_below: 0.0,
        }
    }

    /// Stop as soon as the best energy drops below `energy`.
    pub fn stop_below(mut self, energy: f64) -> Self {
        self.stop_below = energy;
        self
    }

    pub fn run<P: AnnealProblem>(
        &self,
        problem: &P,
        initial: P::State,
    ) -> Result<AnnealOutcome<P::State>, P::Error> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let cooling = self.config.cooling_rate();
        let mut temperature = self.config.initial_temperature;

        let mut current_energy = problem.energy(&initial);
        let mut best = initial.clone();
        let mut best_energy = current_energy;
        let mut current = initial;
        let mut iterations = 0;

        for iteration in 0..self.config.max_iterations {
            if best_energy < self.stop_below {
                break;
            }
            iterations = iteration + 1;

            if let Some(candidate) = problem.neighbor(&current, temperature)? {
                let energy = problem.energy(&candidate);
                let delta = energy - current_energy;
                let accept = delta <= 0.0
                    || (temperature > 0.0 && rng.gen_range(0.0..1.0) < (-delta / temperature).exp());
                if accept {
                    current = candidate;
                    current_energy = energy;
                    if current_energy < best_energy {
                        best = current.clone();
                        best_energy = current_energy;
                    }
                }
            }

            debug!(
                iteration,
                temperature,
                energy = current_energy,
                best = best_energy,
                "anneal step"
            );
            temperature *= cooling;
        }

        Ok(AnnealOutcome {
            best,
            best_energy,
            last: current,
            last_energy: current_energy,
            iterations,
        })
    }
}
