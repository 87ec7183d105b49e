use super::Error;
use ahash::{HashSet, HashSetExt};
use serde::{Deserialize, Serialize};

/// Type of a shift. The discriminant is the offset of the shift inside its day.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
}

impl ShiftType {
    /// All shift types in the order they appear within a day.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Night];

    /// Returns the shift type at the given offset inside a day.
    #[must_use]
    pub const fn from_offset(offset: usize) -> Option<Self> {
        match offset {
            0 => Some(Self::Morning),
            1 => Some(Self::Afternoon),
            2 => Some(Self::Night),
            _ => None,
        }
    }

    /// Returns the offset of the shift inside a day.
    #[must_use]
    pub const fn offset(self) -> usize {
        self as usize
    }

    /// Single letter used in reports.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Morning => 'M',
            Self::Afternoon => 'A',
            Self::Night => 'N',
        }
    }
}

/// Role of a worker.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Role {
    /// Works mornings only and has its own morning minimum.
    Head,
    /// Subject to the afternoon/night minimums and the rest rules.
    Regular,
}

impl Role {
    /// Returns whether a worker with this role may be assigned to the given shift.
    #[must_use]
    pub const fn can_work(self, shift: ShiftType) -> bool {
        match self {
            Self::Head => matches!(shift, ShiftType::Morning),
            Self::Regular => true,
        }
    }
}

/// A worker. `eligible` marks the demographic attribute every slot should be covered by.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Worker {
    pub id: usize,
    pub name: String,
    pub role: Role,
    pub eligible: bool,
    pub min_shifts: usize,
    pub max_shifts: usize,
}

impl Worker {
    /// Creates a new worker.
    #[must_use]
    pub fn new(
        id: usize,
        name: impl Into<String>,
        role: Role,
        eligible: bool,
        min_shifts: usize,
        max_shifts: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            eligible,
            min_shifts,
            max_shifts,
        }
    }
}

/// Number of workers required for one shift of one day.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SlotRequirement {
    pub day: usize,
    pub shift: ShiftType,
    pub required: usize,
}

impl SlotRequirement {
    /// Creates a new slot requirement.
    #[must_use]
    pub const fn new(day: usize, shift: ShiftType, required: usize) -> Self {
        Self {
            day,
            shift,
            required,
        }
    }

    /// Creates the requirements of `days` days repeating the same per-shift counts every day.
    /// `required[k]` is the requirement of the `k`-th shift of the day.
    #[must_use]
    pub fn daily(days: usize, required: &[usize]) -> Vec<Self> {
        (0..days)
            .flat_map(|day| {
                ShiftType::ALL
                    .iter()
                    .zip(required)
                    .map(move |(&shift, &required)| Self::new(day, shift, required))
            })
            .collect()
    }
}

/// Global minimums every worker of a role has to reach.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Minimums {
    /// Afternoon shifts of every regular worker.
    pub afternoon: usize,
    /// Night shifts of every regular worker.
    pub night: usize,
    /// Morning shifts of every head worker.
    pub head_morning: usize,
}

impl Minimums {
    /// Creates new minimums.
    #[must_use]
    pub const fn new(afternoon: usize, night: usize, head_morning: usize) -> Self {
        Self {
            afternoon,
            night,
            head_morning,
        }
    }
}

/// Cost rates per worked shift.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CostRates {
    pub per_shift: f64,
    pub overtime: f64,
    pub head_worker: f64,
}

impl CostRates {
    /// Creates new cost rates.
    #[must_use]
    pub const fn new(per_shift: f64, overtime: f64, head_worker: f64) -> Self {
        Self {
            per_shift,
            overtime,
            head_worker,
        }
    }
}

/// An instance of the staff scheduling problem.
/// Slot `day * shifts_per_day + offset` holds the requirement of that day and shift.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "RawInstance")]
pub struct ProblemInstance {
    num_days: usize,
    shifts_per_day: usize,
    workers: Vec<Worker>,
    slots: Vec<SlotRequirement>,
    minimums: Minimums,
    rates: CostRates,
}

#[derive(Deserialize)]
struct RawInstance {
    num_days: usize,
    shifts_per_day: usize,
    workers: Vec<Worker>,
    slots: Vec<SlotRequirement>,
    #[serde(default)]
    minimums: Minimums,
    rates: CostRates,
}

impl TryFrom<RawInstance> for ProblemInstance {
    type Error = Error;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        Self::new(
            raw.num_days,
            raw.shifts_per_day,
            raw.workers,
            raw.slots,
            raw.minimums,
            raw.rates,
        )
    }
}

impl ProblemInstance {
    /// Creates a new instance of the problem.
    ///
    /// # Errors
    /// - If there are more than three shifts per day.
    /// - If the number of slots is not `num_days * shifts_per_day`.
    /// - If a slot's day or shift does not match its position.
    /// - If a worker has `max_shifts < min_shifts` or a worker id repeats.
    pub fn new(
        num_days: usize,
        shifts_per_day: usize,
        workers: Vec<Worker>,
        slots: Vec<SlotRequirement>,
        minimums: Minimums,
        rates: CostRates,
    ) -> Result<Self, Error> {
        if shifts_per_day > ShiftType::ALL.len() {
            return Err(Error::ShiftsPerDay(shifts_per_day));
        }

        let mismatch = |expected| Error::SlotCount {
            expected,
            actual: slots.len(),
            days: num_days,
            shifts: shifts_per_day,
        };
        let expected = num_days
            .checked_mul(shifts_per_day)
            .ok_or_else(|| mismatch(usize::MAX))?;
        if slots.len() != expected {
            return Err(mismatch(expected));
        }

        for (index, slot) in slots.iter().enumerate() {
            if slot.day != index / shifts_per_day || slot.shift.offset() != index % shifts_per_day {
                return Err(Error::SlotMisaligned {
                    index,
                    day: slot.day,
                    shift: slot.shift,
                });
            }
        }

        let mut ids = HashSet::with_capacity(workers.len());
        for worker in &workers {
            if worker.max_shifts < worker.min_shifts {
                return Err(Error::ShiftBounds {
                    id: worker.id,
                    min: worker.min_shifts,
                    max: worker.max_shifts,
                });
            }
            if !ids.insert(worker.id) {
                return Err(Error::DuplicateWorker(worker.id));
            }
        }

        Ok(Self {
            num_days,
            shifts_per_day,
            workers,
            slots,
            minimums,
            rates,
        })
    }

    #[must_use]
    pub const fn num_days(&self) -> usize {
        self.num_days
    }

    #[must_use]
    pub const fn shifts_per_day(&self) -> usize {
        self.shifts_per_day
    }

    /// Returns the number of slots, `num_days * shifts_per_day`.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotRequirement] {
        &self.slots
    }

    #[must_use]
    pub const fn minimums(&self) -> &Minimums {
        &self.minimums
    }

    #[must_use]
    pub const fn rates(&self) -> &CostRates {
        &self.rates
    }

    /// Returns the linear index of the given day and shift, if the instance has it.
    #[must_use]
    pub fn slot_index(&self, day: usize, shift: ShiftType) -> Option<usize> {
        let index = day * self.shifts_per_day + shift.offset();
        (day < self.num_days && shift.offset() < self.shifts_per_day).then_some(index)
    }

    /// Returns the shift type of a slot.
    #[must_use]
    pub fn slot_shift(&self, slot: usize) -> ShiftType {
        self.slots[slot].shift
    }

    /// Returns the indices of all slots of the given shift type in day order.
    pub fn slots_of(&self, shift: ShiftType) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_days).filter_map(move |day| self.slot_index(day, shift))
    }

    /// Returns whether at least one worker has the eligibility attribute.
    #[must_use]
    pub fn has_eligible(&self) -> bool {
        self.workers.iter().any(|worker| worker.eligible)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn workers() -> Vec<Worker> {
        vec![
            Worker::new(0, "Head", Role::Head, true, 1, 2),
            Worker::new(1, "Regular", Role::Regular, false, 1, 3),
        ]
    }

    fn instance() -> Result<ProblemInstance, Error> {
        ProblemInstance::new(
            2,
            3,
            workers(),
            SlotRequirement::daily(2, &[2, 1, 1]),
            Minimums::new(1, 1, 1),
            CostRates::new(100.0, 150.0, 120.0),
        )
    }

    #[test]
    fn instance_should_serialize() -> anyhow::Result<()> {
        let instance = instance()?;

        let serialized = crate::data::to_string(&instance)?;
        let mut reader = std::io::Cursor::new(serialized);
        let deserialized: ProblemInstance = crate::data::deserialize(&mut reader)?;

        assert_eq!(instance, deserialized);

        Ok(())
    }

    #[test]
    fn deserialization_validates() {
        let json = r#"{
            "num_days": 1,
            "shifts_per_day": 3,
            "workers": [],
            "slots": [{"day": 0, "shift": "Morning", "required": 1}],
            "rates": {"per_shift": 1.0, "overtime": 1.0, "head_worker": 1.0}
        }"#;
        let mut reader = std::io::Cursor::new(json);
        let result: anyhow::Result<ProblemInstance> = crate::data::deserialize(&mut reader);
        assert!(result.is_err());
    }

    #[test]
    fn test_slot_indices() -> anyhow::Result<()> {
        let instance = instance()?;
        assert_eq!(instance.total_slots(), 6);
        assert_eq!(instance.slot_index(1, ShiftType::Afternoon), Some(4));
        assert_eq!(instance.slot_index(2, ShiftType::Morning), None);
        assert_eq!(instance.slot_shift(5), ShiftType::Night);
        assert_eq!(instance.slots_of(ShiftType::Night).collect::<Vec<_>>(), [2, 5]);
        assert!(instance.has_eligible());
        Ok(())
    }

    #[test]
    fn test_slot_count_mismatch() {
        let result = ProblemInstance::new(
            2,
            3,
            workers(),
            SlotRequirement::daily(1, &[1, 1, 1]),
            Minimums::default(),
            CostRates::default(),
        );
        assert!(matches!(
            result,
            Err(Error::SlotCount {
                expected: 6,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn huge_horizon_is_rejected() {
        let json = format!(
            r#"{{"num_days": {}, "shifts_per_day": 3, "workers": [], "slots": [],
                "rates": {{"per_shift": 1.0, "overtime": 1.0, "head_worker": 1.0}}}}"#,
            usize::MAX
        );
        let result: anyhow::Result<ProblemInstance> =
            crate::data::deserialize(&mut std::io::Cursor::new(json));
        assert!(result.is_err());

        let result = ProblemInstance::new(
            usize::MAX,
            3,
            workers(),
            Vec::new(),
            Minimums::default(),
            CostRates::default(),
        );
        assert!(matches!(result, Err(Error::SlotCount { actual: 0, .. })));
    }

    #[test]
    fn test_invalid_instances() {
        let misaligned = vec![
            SlotRequirement::new(0, ShiftType::Afternoon, 1),
            SlotRequirement::new(0, ShiftType::Morning, 1),
        ];
        let result = ProblemInstance::new(
            1,
            2,
            workers(),
            misaligned,
            Minimums::default(),
            CostRates::default(),
        );
        assert!(matches!(result, Err(Error::SlotMisaligned { index: 0, .. })));

        let result = ProblemInstance::new(
            1,
            4,
            workers(),
            vec![SlotRequirement::new(0, ShiftType::Morning, 1); 4],
            Minimums::default(),
            CostRates::default(),
        );
        assert_eq!(result, Err(Error::ShiftsPerDay(4)));

        let bounds = vec![Worker::new(3, "Broken", Role::Regular, false, 4, 2)];
        let result = ProblemInstance::new(
            1,
            1,
            bounds,
            SlotRequirement::daily(1, &[1]),
            Minimums::default(),
            CostRates::default(),
        );
        assert_eq!(
            result,
            Err(Error::ShiftBounds {
                id: 3,
                min: 4,
                max: 2
            })
        );

        let duplicated = vec![
            Worker::new(7, "First", Role::Regular, false, 0, 1),
            Worker::new(7, "Second", Role::Regular, false, 0, 1),
        ];
        let result = ProblemInstance::new(
            1,
            1,
            duplicated,
            SlotRequirement::daily(1, &[1]),
            Minimums::default(),
            CostRates::default(),
        );
        assert_eq!(result, Err(Error::DuplicateWorker(7)));
    }

    #[test]
    fn test_roles() {
        assert!(Role::Head.can_work(ShiftType::Morning));
        assert!(!Role::Head.can_work(ShiftType::Afternoon));
        assert!(!Role::Head.can_work(ShiftType::Night));
        assert!(ShiftType::ALL.iter().all(|&shift| Role::Regular.can_work(shift)));
        assert_eq!(ShiftType::from_offset(2), Some(ShiftType::Night));
        assert_eq!(ShiftType::from_offset(3), None);
    }
}
