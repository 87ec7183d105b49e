use super::ShiftType;

/// Reasons a problem instance or a schedule is rejected.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} slot requirements ({days} days x {shifts} shifts), got {actual}")]
    SlotCount {
        expected: usize,
        actual: usize,
        days: usize,
        shifts: usize,
    },
    #[error("at most 3 shifts per day are supported, got {0}")]
    ShiftsPerDay(usize),
    #[error("slot {index} is tagged as day {day} {shift:?}, which does not match its position")]
    SlotMisaligned {
        index: usize,
        day: usize,
        shift: ShiftType,
    },
    #[error("worker {id} has max_shifts {max} below min_shifts {min}")]
    ShiftBounds { id: usize, min: usize, max: usize },
    #[error("worker id {0} is used more than once")]
    DuplicateWorker(usize),
    #[error("schedule row {row} has {actual} slots, expected {expected}")]
    RaggedSchedule {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
