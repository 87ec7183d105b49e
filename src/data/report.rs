use crate::cast_f64;
use crate::core::{ProblemInstance, ShiftType, Solution};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result};

const WIDTH: usize = 80;
const DAY_NAMES: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];

/// Returns the name of the day. Day 0 is a Saturday and names repeat every week.
#[must_use]
pub fn day_name(day: usize) -> &'static str {
    DAY_NAMES[day % DAY_NAMES.len()]
}

/// Human readable report of a solution.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleReport<'a> {
    instance: &'a ProblemInstance,
    solution: &'a Solution,
}

impl<'a> ScheduleReport<'a> {
    /// Creates a report of the solution of the instance.
    #[must_use]
    pub const fn new(instance: &'a ProblemInstance, solution: &'a Solution) -> Self {
        Self { instance, solution }
    }

    fn shifts(&self) -> impl Iterator<Item = ShiftType> {
        ShiftType::ALL.into_iter().take(self.instance.shifts_per_day())
    }

    fn write_separator(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:-<16}+", "")?;
        for _ in 0..self.instance.num_days() {
            write!(f, "-------+")?;
        }
        writeln!(f, "-------+")
    }

    fn write_grid(&self, f: &mut Formatter<'_>) -> Result {
        let instance = self.instance;
        let schedule = &self.solution.schedule;

        writeln!(f, "{:=<WIDTH$}", "")?;
        writeln!(f, "{:^WIDTH$}", "WORKER SCHEDULE")?;
        writeln!(f, "{:=<WIDTH$}", "")?;

        write!(f, "{:>15} |", "Worker")?;
        for day in 0..instance.num_days() {
            write!(f, " {:>5} |", day_name(day))?;
        }
        writeln!(f, " {:>5} |", "Total")?;
        self.write_separator(f)?;

        for (worker, info) in instance.workers().iter().enumerate() {
            write!(f, "{:>15} |", info.name)?;
            for day in 0..instance.num_days() {
                let codes: String = self
                    .shifts()
                    .filter(|&shift| {
                        instance
                            .slot_index(day, shift)
                            .is_some_and(|slot| schedule.is_assigned(worker, slot))
                    })
                    .map(ShiftType::code)
                    .collect();
                let codes = if codes.is_empty() { "-".into() } else { codes };
                write!(f, " {codes:>5} |")?;
            }
            writeln!(f, " {:>5} |", schedule.worked(worker))?;
        }

        self.write_separator(f)
    }

    fn write_staffing(&self, f: &mut Formatter<'_>) -> Result {
        let instance = self.instance;

        writeln!(f)?;
        writeln!(f, "STAFFING PER SHIFT (assigned/required)")?;
        write!(f, "{:>10} |", "Day")?;
        for shift in self.shifts() {
            write!(f, " {:>10} |", format!("{shift:?}"))?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<WIDTH$}", "")?;

        for day in 0..instance.num_days() {
            write!(f, "{:>10} |", day_name(day))?;
            for shift in self.shifts() {
                if let Some(slot) = instance.slot_index(day, shift) {
                    let staffed = self.solution.schedule.staffed(slot);
                    let required = instance.slots()[slot].required;
                    write!(f, " {:>10} |", format!("{staffed}/{required}"))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_costs(&self, f: &mut Formatter<'_>) -> Result {
        let cost = &self.solution.cost;

        writeln!(f)?;
        writeln!(f, "{:=<WIDTH$}", "")?;
        writeln!(f, "COSTS")?;
        writeln!(f, "{:-<WIDTH$}", "")?;
        writeln!(f, "  {:<22}{:>15.2}", "Regular shifts:", cost.normal)?;
        writeln!(f, "  {:<22}{:>15.2}", "Overtime:", cost.overtime)?;
        writeln!(f, "  {:<22}{:>15.2}", "Head workers:", cost.head_worker)?;
        writeln!(f, "{:-<WIDTH$}", "")?;
        writeln!(f, "  {:<22}{:>15.2}", "TOTAL:", cost.total)?;
        writeln!(f, "{:=<WIDTH$}", "")?;

        writeln!(f)?;
        writeln!(f, "Violations: {}", self.solution.violations)?;
        writeln!(
            f,
            "Violations after construction: {}",
            self.solution.construction_violations
        )?;
        writeln!(f, "Solve time: {:.2} ms", self.solution.solve_time_ms)?;
        if self.solution.feasible {
            writeln!(f, "Feasible schedule found.")
        } else {
            writeln!(f, "Heuristic schedule with {} violations.", self.solution.violations)
        }
    }

    fn write_distribution(&self, f: &mut Formatter<'_>) -> Result {
        let schedule = &self.solution.schedule;
        let workers = schedule.workers();

        let mut distribution = BTreeMap::new();
        for worker in 0..workers {
            *distribution.entry(schedule.worked(worker)).or_insert(0_usize) += 1;
        }

        writeln!(f)?;
        writeln!(f, "SHIFTS PER WORKER")?;
        for (shifts, count) in distribution {
            let percent = 100.0 * cast_f64(count) / cast_f64(workers);
            writeln!(f, "  {shifts} shifts: {count} workers ({percent:.1}%)")?;
        }
        Ok(())
    }
}

impl Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.write_grid(f)?;
        self.write_staffing(f)?;
        self.write_costs(f)?;
        self.write_distribution(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::Greedy;
    use crate::core::Solver;
    use crate::data::Dataset;

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(0), "Sat");
        assert_eq!(day_name(2), "Mon");
        assert_eq!(day_name(7), "Sat");
    }

    #[test]
    fn report_lists_everything() -> anyhow::Result<()> {
        let instance = Dataset::Small.instance()?;
        let solution = Greedy::new(1).solve(&instance);

        let report = ScheduleReport::new(&instance, &solution).to_string();

        for worker in instance.workers() {
            assert!(report.contains(&worker.name), "missing {}", worker.name);
        }
        assert!(report.contains("Fri"));
        assert!(report.contains(&format!("Violations: {}", solution.violations)));
        assert!(report.contains(&format!("{:.2}", solution.cost.total)));
        assert!(report.contains("SHIFTS PER WORKER"));
        Ok(())
    }
}
