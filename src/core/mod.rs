mod cost;
mod error;
mod problem;
mod schedule;
mod solution;
mod violation;

pub use cost::*;
pub use error::*;
pub use problem::*;
pub use schedule::*;
pub use solution::*;
pub use violation::*;

/// Solves instances of the staff scheduling problem.
pub trait Solver {
    /// Produces a schedule for the given instance.
    /// Never fails; an unsatisfiable instance yields a solution with violations.
    fn solve(&mut self, instance: &ProblemInstance) -> Solution;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}
