use crate::core::{ProblemInstance, Role, Schedule, ShiftType};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Builds an initial schedule in four greedy phases:
/// head worker mornings, requirement fill, minimum shift repair and
/// afternoon/night repair. Never fails; what cannot be satisfied is left for
/// the violation count.
pub fn construct(instance: &ProblemInstance, rng: &mut impl Rng) -> Schedule {
    let mut builder = Construction::new(instance);

    builder.seed_head_mornings(rng);
    debug!(assigned = builder.assigned(), "seeded head worker mornings");

    builder.fill_requirements();
    debug!(assigned = builder.assigned(), "filled slot requirements");

    builder.repair_minimum_shifts();
    debug!(assigned = builder.assigned(), "repaired minimum shifts");

    builder.repair_shift_minimums();
    debug!(assigned = builder.assigned(), "repaired afternoon and night minimums");

    builder.schedule
}

/// Schedule under construction together with the number of shifts of every worker.
struct Construction<'a> {
    instance: &'a ProblemInstance,
    schedule: Schedule,
    loads: Vec<usize>,
}

impl<'a> Construction<'a> {
    fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            schedule: Schedule::new(instance),
            loads: vec![0; instance.workers().len()],
        }
    }

    fn assigned(&self) -> usize {
        self.loads.iter().sum()
    }

    fn assign(&mut self, worker: usize, slot: usize) {
        self.schedule.set(worker, slot, true);
        self.loads[worker] += 1;
    }

    /// Whether the worker is free in the slot and may take it under the role and rest rules.
    fn compatible(&self, worker: usize, slot: usize) -> bool {
        let role = self.instance.workers()[worker].role;
        if self.schedule.is_assigned(worker, slot) || !role.can_work(self.instance.slot_shift(slot)) {
            return false;
        }
        match role {
            Role::Head => true,
            Role::Regular => !self.schedule.rest_conflict(worker, slot),
        }
    }

    fn seed_head_mornings(&mut self, rng: &mut impl Rng) {
        let instance = self.instance;
        let mornings: Vec<_> = instance.slots_of(ShiftType::Morning).collect();

        for (worker, info) in instance.workers().iter().enumerate() {
            if info.role != Role::Head {
                continue;
            }

            let mut candidates = mornings.clone();
            candidates.shuffle(rng);
            for &slot in candidates.iter().take(info.min_shifts) {
                self.assign(worker, slot);
            }
        }
    }

    /// Fills every slot up to its requirement, least loaded workers first.
    fn fill_requirements(&mut self) {
        let instance = self.instance;

        for (slot, requirement) in instance.slots().iter().enumerate() {
            let missing = requirement.required.saturating_sub(self.schedule.staffed(slot));
            if missing == 0 {
                continue;
            }

            let mut candidates: Vec<_> = instance
                .workers()
                .iter()
                .enumerate()
                .filter(|&(worker, info)| {
                    self.loads[worker] < info.max_shifts && self.compatible(worker, slot)
                })
                .map(|(worker, _)| worker)
                .collect();
            candidates.sort_by_key(|&worker| self.loads[worker]);

            for worker in candidates.into_iter().take(missing) {
                self.assign(worker, slot);
            }
        }
    }

    /// Gives every worker below `min_shifts` the first slots it can take.
    fn repair_minimum_shifts(&mut self) {
        let instance = self.instance;

        for (worker, info) in instance.workers().iter().enumerate() {
            for _ in 0..instance.total_slots() {
                if self.loads[worker] >= info.min_shifts {
                    break;
                }
                let free = (0..instance.total_slots()).find(|&slot| self.compatible(worker, slot));
                let Some(slot) = free else {
                    break;
                };
                self.assign(worker, slot);
            }
        }
    }

    fn repair_shift_minimums(&mut self) {
        let instance = self.instance;
        let minimums = *instance.minimums();

        for (worker, info) in instance.workers().iter().enumerate() {
            match info.role {
                Role::Head => {}
                Role::Regular => {
                    self.repair_shift(worker, ShiftType::Afternoon, minimums.afternoon);
                    self.repair_shift(worker, ShiftType::Night, minimums.night);
                }
            }
        }
    }

    /// Raises the number of `shift` slots of a regular worker towards `minimum`.
    /// A morning assignment is moved onto the shift when possible, otherwise a new
    /// assignment is added while the worker is below `max_shifts`.
    fn repair_shift(&mut self, worker: usize, shift: ShiftType, minimum: usize) {
        let instance = self.instance;
        let max_shifts = instance.workers()[worker].max_shifts;
        let mut count = instance
            .slots_of(shift)
            .filter(|&slot| self.schedule.is_assigned(worker, slot))
            .count();

        for _ in 0..instance.num_days() {
            if count >= minimum {
                break;
            }

            let target = instance
                .slots_of(shift)
                .find(|&slot| self.compatible(worker, slot))
                .or_else(|| {
                    instance
                        .slots_of(shift)
                        .find(|&slot| !self.schedule.is_assigned(worker, slot))
                });
            let Some(target) = target else {
                break;
            };

            if let Some(morning) = self.spare_morning(worker) {
                self.schedule.set(worker, morning, false);
                self.schedule.set(worker, target, true);
            } else if self.loads[worker] < max_shifts {
                self.assign(worker, target);
            } else {
                break;
            }
            count += 1;
        }
    }

    /// Morning assignment of the worker to give up, preferring over-staffed slots.
    fn spare_morning(&self, worker: usize) -> Option<usize> {
        let instance = self.instance;
        let mornings: Vec<_> = instance
            .slots_of(ShiftType::Morning)
            .filter(|&slot| self.schedule.is_assigned(worker, slot))
            .collect();

        mornings
            .iter()
            .copied()
            .find(|&slot| self.schedule.staffed(slot) > instance.slots()[slot].required)
            .or_else(|| mornings.first().copied())
    }
}
