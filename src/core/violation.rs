use super::{ProblemInstance, Role, Schedule, ShiftType};
use crate::cast_u64;

/// Penalty per missing worker in a slot.
pub const SHORTFALL_WEIGHT: u64 = 10;
/// Penalty per shift below `min_shifts` or above `max_shifts`.
pub const SHIFT_BOUNDS_WEIGHT: u64 = 5;
/// Penalty per shift below one of the afternoon, night or head morning minimums.
pub const SHIFT_MINIMUM_WEIGHT: u64 = 3;
/// Penalty per pair of shifts two slots apart.
pub const REST_WEIGHT: u64 = 2;
/// Penalty per shift above two in a window of five consecutive slots.
pub const WINDOW_WEIGHT: u64 = 2;
/// Penalty per afternoon or night shift of a head worker.
pub const HEAD_SHIFT_WEIGHT: u64 = 10;
/// Penalty per slot without an eligible worker.
pub const ELIGIBILITY_WEIGHT: u64 = 5;

/// Number of consecutive slots checked by the window rule.
const WINDOW: usize = 5;
/// Shifts allowed inside one window.
const WINDOW_LIMIT: usize = 2;

/// Counts the weighted constraint violations of a schedule.
/// Zero means the schedule is feasible. The whole matrix is rescanned on every call.
///
/// # Panics
/// - If the schedule does not match the instance in debug mode.
#[must_use]
pub fn count_violations(instance: &ProblemInstance, schedule: &Schedule) -> u64 {
    debug_assert!(schedule.fits(instance), "Schedule does not match the instance");

    let staffing: u64 = instance
        .slots()
        .iter()
        .enumerate()
        .map(|(slot, requirement)| shortfall(requirement.required, schedule.staffed(slot)))
        .sum();

    let workers: u64 = (0..instance.workers().len())
        .map(|worker| worker_violations(instance, schedule, worker))
        .sum();

    staffing * SHORTFALL_WEIGHT + workers + eligibility_violations(instance, schedule)
}

fn worker_violations(instance: &ProblemInstance, schedule: &Schedule, worker: usize) -> u64 {
    let info = &instance.workers()[worker];
    let minimums = instance.minimums();
    let row = schedule.row(worker);
    let count = |shift| instance.slots_of(shift).filter(|&slot| row[slot]).count();

    let worked = schedule.worked(worker);
    let bounds = shortfall(info.min_shifts, worked) + excess(worked, info.max_shifts);
    let mut violations = bounds * SHIFT_BOUNDS_WEIGHT;

    match info.role {
        Role::Regular => {
            let minimum = shortfall(minimums.afternoon, count(ShiftType::Afternoon))
                + shortfall(minimums.night, count(ShiftType::Night));
            violations += minimum * SHIFT_MINIMUM_WEIGHT;

            let no_rest = row.windows(3).filter(|pair| pair[0] && pair[2]).count();
            violations += cast_u64(no_rest) * REST_WEIGHT;

            let crowded: u64 = row
                .windows(WINDOW)
                .map(|window| excess(window.iter().filter(|&&cell| cell).count(), WINDOW_LIMIT))
                .sum();
            violations += crowded * WINDOW_WEIGHT;
        }
        Role::Head => {
            let forbidden = count(ShiftType::Afternoon) + count(ShiftType::Night);
            violations += cast_u64(forbidden) * HEAD_SHIFT_WEIGHT;

            let minimum = shortfall(minimums.head_morning, count(ShiftType::Morning));
            violations += minimum * SHIFT_MINIMUM_WEIGHT;
        }
    }

    violations
}

fn eligibility_violations(instance: &ProblemInstance, schedule: &Schedule) -> u64 {
    if !instance.has_eligible() {
        return 0;
    }

    let workers = instance.workers();
    let uncovered = (0..instance.total_slots())
        .filter(|&slot| {
            !workers
                .iter()
                .enumerate()
                .any(|(worker, info)| info.eligible && schedule.is_assigned(worker, slot))
        })
        .count();

    cast_u64(uncovered) * ELIGIBILITY_WEIGHT
}

/// How much `value` falls short of `target`.
fn shortfall(target: usize, value: usize) -> u64 {
    cast_u64(target.saturating_sub(value))
}

/// How much `value` exceeds `limit`.
fn excess(value: usize, limit: usize) -> u64 {
    cast_u64(value.saturating_sub(limit))
}
