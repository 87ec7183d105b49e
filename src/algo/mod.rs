mod construct;
mod local_search;
mod solve;

pub use construct::construct;
pub use local_search::{improve, Move, Score};
pub use solve::{solve, Greedy, HillClimbing};

use crate::core::Solver;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Local search iterations used when nothing else is configured.
pub const DEFAULT_ITERATIONS: usize = 50_000;

/// Factories of all available solvers.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static SOLVERS: [fn(&SolverConfig) -> Box<dyn Solver>];

/// Settings shared by all solvers.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Local search iterations.
    pub iterations: usize,
    /// Seed of the random source. Without it every run differs.
    pub seed: Option<u64>,
}

impl SolverConfig {
    /// Creates a config, seeded from entropy when `seed` is missing.
    #[must_use]
    pub const fn new(iterations: usize, seed: Option<u64>) -> Self {
        Self { iterations, seed }
    }

    /// Creates a config with a fixed seed.
    #[must_use]
    pub const fn seeded(iterations: usize, seed: u64) -> Self {
        Self {
            iterations,
            seed: Some(seed),
        }
    }

    /// Creates the random source of a solver.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

/// Creates the solver with the given name.
#[must_use]
pub fn solver(name: &str, config: &SolverConfig) -> Option<Box<dyn Solver>> {
    SOLVERS
        .iter()
        .map(|init| init(config))
        .find(|solver| solver.name() == name)
}
