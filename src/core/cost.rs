use super::{ProblemInstance, Role, Schedule};
use crate::cast_f64;
use serde::{Deserialize, Serialize};

/// Labor cost of a schedule split by cost component.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Every shift of a regular worker at the per-shift rate.
    pub normal: f64,
    /// Shifts of a regular worker beyond `min_shifts` at the overtime rate.
    /// These shifts are also part of `normal`.
    pub overtime: f64,
    /// Every shift of a head worker at the head worker rate.
    pub head_worker: f64,
    pub total: f64,
}

/// Calculates the labor cost of a schedule.
#[must_use]
pub fn calculate_cost(instance: &ProblemInstance, schedule: &Schedule) -> CostBreakdown {
    let rates = instance.rates();
    let mut cost = CostBreakdown::default();

    for (worker, info) in instance.workers().iter().enumerate() {
        let worked = schedule.worked(worker);
        match info.role {
            Role::Regular => {
                cost.normal += cast_f64(worked) * rates.per_shift;
                cost.overtime += cast_f64(worked.saturating_sub(info.min_shifts)) * rates.overtime;
            }
            Role::Head => cost.head_worker += cast_f64(worked) * rates.head_worker,
        }
    }

    cost.total = cost.normal + cost.overtime + cost.head_worker;
    cost
}
