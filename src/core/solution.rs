use super::{calculate_cost, count_violations, CostBreakdown, ProblemInstance, Schedule};
use serde::{Deserialize, Serialize};

/// Final result of a solve. Created once and never changed afterwards.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Solution {
    /// Whether the schedule has no violations.
    pub feasible: bool,
    pub schedule: Schedule,
    pub violations: u64,
    /// Violations of the schedule before local search.
    pub construction_violations: u64,
    pub cost: CostBreakdown,
    pub solve_time_ms: f64,
}

impl Solution {
    /// Scores the schedule and packs it into a solution.
    #[must_use]
    pub fn new(
        instance: &ProblemInstance,
        schedule: Schedule,
        construction_violations: u64,
        solve_time_ms: f64,
    ) -> Self {
        let violations = count_violations(instance, &schedule);
        let cost = calculate_cost(instance, &schedule);
        Self {
            feasible: violations == 0,
            schedule,
            violations,
            construction_violations,
            cost,
            solve_time_ms,
        }
    }
}
