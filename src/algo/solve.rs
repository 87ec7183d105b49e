use super::{construct, improve, SolverConfig};
use crate::core::{count_violations, ProblemInstance, Solution, Solver};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// Solves the instance: greedy construction, local search and scoring of the result.
pub fn solve(instance: &ProblemInstance, iterations: usize, rng: &mut impl Rng) -> Solution {
    let start = Instant::now();
    info!(
        workers = instance.workers().len(),
        slots = instance.total_slots(),
        iterations,
        "solving instance"
    );

    let schedule = construct(instance, rng);
    let construction_violations = count_violations(instance, &schedule);
    debug!(violations = construction_violations, "constructed initial schedule");

    let schedule = improve(instance, schedule, iterations, rng);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    let solution = Solution::new(instance, schedule, construction_violations, elapsed);
    info!(
        feasible = solution.feasible,
        violations = solution.violations,
        cost = solution.cost.total,
        time_ms = solution.solve_time_ms,
        "solved instance"
    );

    solution
}

/// Greedy construction without local search.
#[derive(Clone, Debug)]
pub struct Greedy {
    rng: StdRng,
}

impl Greedy {
    /// Creates a new greedy solver with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_config(&SolverConfig::seeded(0, seed))
    }

    /// Creates a new greedy solver. The iteration budget is ignored.
    #[must_use]
    pub fn from_config(config: &SolverConfig) -> Self {
        Self { rng: config.rng() }
    }
}

impl Default for Greedy {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl Solver for Greedy {
    fn solve(&mut self, instance: &ProblemInstance) -> Solution {
        solve(instance, 0, &mut self.rng)
    }

    fn name(&self) -> &'static str {
        "Greedy"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static GREEDY: fn(&SolverConfig) -> Box<dyn Solver> =
    |config| Box::new(Greedy::from_config(config));

/// Greedy construction improved by hill climbing.
#[derive(Clone, Debug)]
pub struct HillClimbing {
    iterations: usize,
    rng: StdRng,
}

impl HillClimbing {
    /// Creates a new hill climbing solver with a fixed seed.
    #[must_use]
    pub fn new(iterations: usize, seed: u64) -> Self {
        Self::from_config(&SolverConfig::seeded(iterations, seed))
    }

    #[must_use]
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            iterations: config.iterations,
            rng: config.rng(),
        }
    }
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl Solver for HillClimbing {
    fn solve(&mut self, instance: &ProblemInstance) -> Solution {
        solve(instance, self.iterations, &mut self.rng)
    }

    fn name(&self) -> &'static str {
        "HillClimbing"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static HILL_CLIMBING: fn(&SolverConfig) -> Box<dyn Solver> =
    |config| Box::new(HillClimbing::from_config(config));
