use super::{Error, ProblemInstance};
use serde::{Deserialize, Serialize};

/// Dense assignment matrix of workers to slots.
/// Every cell is defined; `true` means the worker works the slot.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Schedule {
    workers: usize,
    slots: usize,
    cells: Vec<bool>,
}

impl Schedule {
    /// Creates an empty schedule matching the dimensions of the instance.
    #[must_use]
    pub fn new(instance: &ProblemInstance) -> Self {
        Self::empty(instance.workers().len(), instance.total_slots())
    }

    /// Creates an empty schedule of the given dimensions.
    #[must_use]
    pub fn empty(workers: usize, slots: usize) -> Self {
        Self {
            workers,
            slots,
            cells: vec![false; workers * slots],
        }
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub const fn slots(&self) -> usize {
        self.slots
    }

    /// Returns whether the dimensions match the instance.
    #[must_use]
    pub fn fits(&self, instance: &ProblemInstance) -> bool {
        self.workers == instance.workers().len() && self.slots == instance.total_slots()
    }

    /// Returns whether the worker is assigned to the slot.
    #[must_use]
    pub fn is_assigned(&self, worker: usize, slot: usize) -> bool {
        self.cells[self.index(worker, slot)]
    }

    /// Sets the assignment of the worker to the slot.
    pub fn set(&mut self, worker: usize, slot: usize, value: bool) {
        let index = self.index(worker, slot);
        self.cells[index] = value;
    }

    /// Inverts one cell.
    pub fn flip(&mut self, worker: usize, slot: usize) {
        let index = self.index(worker, slot);
        self.cells[index] = !self.cells[index];
    }

    /// Exchanges two cells of the same worker. Applying it twice restores the schedule.
    pub fn swap(&mut self, worker: usize, first: usize, second: usize) {
        let (first, second) = (self.index(worker, first), self.index(worker, second));
        self.cells.swap(first, second);
    }

    /// Returns the assignments of one worker, indexed by slot.
    #[must_use]
    pub fn row(&self, worker: usize) -> &[bool] {
        debug_assert!(worker < self.workers);
        let start = worker * self.slots;
        &self.cells[start..start + self.slots]
    }

    /// Returns the number of shifts the worker works.
    #[must_use]
    pub fn worked(&self, worker: usize) -> usize {
        self.row(worker).iter().filter(|&&cell| cell).count()
    }

    /// Returns the number of workers assigned to the slot.
    #[must_use]
    pub fn staffed(&self, slot: usize) -> usize {
        (0..self.workers)
            .filter(|&worker| self.is_assigned(worker, slot))
            .count()
    }

    /// Returns whether the worker works a slot two positions before or after `slot`,
    /// leaving no free shift in between. Positions outside the schedule are ignored.
    #[must_use]
    pub fn rest_conflict(&self, worker: usize, slot: usize) -> bool {
        let before = slot
            .checked_sub(2)
            .is_some_and(|other| self.is_assigned(worker, other));
        let after = slot + 2 < self.slots && self.is_assigned(worker, slot + 2);
        before || after
    }

    fn index(&self, worker: usize, slot: usize) -> usize {
        debug_assert!(worker < self.workers && slot < self.slots);
        worker * self.slots + slot
    }
}

impl TryFrom<Vec<Vec<bool>>> for Schedule {
    type Error = Error;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        let slots = rows.first().map_or(0, Vec::len);
        let mut schedule = Self::empty(rows.len(), slots);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != slots {
                return Err(Error::RaggedSchedule {
                    row,
                    expected: slots,
                    actual: values.len(),
                });
            }
            for (slot, &value) in values.iter().enumerate() {
                schedule.set(row, slot, value);
            }
        }

        Ok(schedule)
    }
}

impl From<Schedule> for Vec<Vec<bool>> {
    fn from(schedule: Schedule) -> Self {
        (0..schedule.workers)
            .map(|worker| schedule.row(worker).to_vec())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Schedule {
        let mut schedule = Schedule::empty(2, 6);
        schedule.set(0, 0, true);
        schedule.set(0, 4, true);
        schedule.set(1, 4, true);
        schedule
    }

    #[test]
    fn test_counts() {
        let schedule = sample();
        assert_eq!(schedule.worked(0), 2);
        assert_eq!(schedule.worked(1), 1);
        assert_eq!(schedule.staffed(4), 2);
        assert_eq!(schedule.staffed(3), 0);
        assert_eq!(schedule.row(0), [true, false, false, false, true, false]);
    }

    #[test]
    fn swap_is_an_involution() {
        let original = sample();
        let mut schedule = original.clone();

        schedule.swap(0, 0, 3);
        assert_ne!(schedule, original);
        assert!(schedule.is_assigned(0, 3));
        assert!(!schedule.is_assigned(0, 0));

        schedule.swap(0, 0, 3);
        assert_eq!(schedule, original);
    }

    #[test]
    fn flip_is_an_involution() {
        let original = sample();
        let mut schedule = original.clone();
        schedule.flip(1, 5);
        assert!(schedule.is_assigned(1, 5));
        schedule.flip(1, 5);
        assert_eq!(schedule, original);
    }

    #[test]
    fn test_rest_conflict() {
        let schedule = sample();
        assert!(schedule.rest_conflict(0, 2));
        assert!(!schedule.rest_conflict(0, 4));
        assert!(!schedule.rest_conflict(0, 1));
        assert!(schedule.rest_conflict(1, 2));
        assert!(!schedule.rest_conflict(1, 5));

        let mut tiny = Schedule::empty(1, 2);
        tiny.set(0, 0, true);
        assert!(!tiny.rest_conflict(0, 0));
        assert!(!tiny.rest_conflict(0, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "slot < self.slots")]
    fn slot_past_the_row_is_rejected() {
        let mut schedule = Schedule::empty(2, 3);
        schedule.set(0, 3, true);
    }

    #[test]
    fn rows_without_slots_are_empty() {
        let schedule = Schedule::empty(2, 0);
        assert!(schedule.row(1).is_empty());
        assert_eq!(schedule.worked(0), 0);
    }

    #[test]
    fn schedule_should_serialize() -> anyhow::Result<()> {
        let schedule = sample();
        let serialized = crate::data::to_string(&schedule)?;
        let mut reader = std::io::Cursor::new(serialized);
        let deserialized: Schedule = crate::data::deserialize(&mut reader)?;
        assert_eq!(schedule, deserialized);
        Ok(())
    }

    #[test]
    fn ragged_schedule_is_rejected() {
        let rows = vec![vec![true, false], vec![true]];
        assert_eq!(
            Schedule::try_from(rows),
            Err(Error::RaggedSchedule {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }
}
