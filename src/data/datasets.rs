use crate::core::{CostRates, Error, Minimums, ProblemInstance, Role, SlotRequirement, Worker};

/// Built-in problem instances.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Dataset {
    /// 12 workers over one week, solved in milliseconds.
    Small,
    /// 46 workers over one week with realistic requirements and rates.
    CaseStudy,
}

impl Dataset {
    /// Builds the instance of the dataset.
    ///
    /// # Errors
    /// - Never for the built-in data; the instance still goes through validation.
    pub fn instance(self) -> Result<ProblemInstance, Error> {
        match self {
            Self::Small => small(),
            Self::CaseStudy => case_study(),
        }
    }
}

const DAYS: usize = 7;
const SHIFTS_PER_DAY: usize = 3;

fn small() -> Result<ProblemInstance, Error> {
    let heads = (0..2).map(|i| {
        let name = format!("Head {}", i + 1);
        Worker::new(i, name, Role::Head, true, 4, 6)
    });
    let regulars = (0..10).map(|i| {
        let name = format!("Worker {}", i + 1);
        Worker::new(2 + i, name, Role::Regular, i % 2 == 0, 5, 7)
    });

    ProblemInstance::new(
        DAYS,
        SHIFTS_PER_DAY,
        heads.chain(regulars).collect(),
        SlotRequirement::daily(DAYS, &[4, 3, 3]),
        Minimums::new(1, 1, 4),
        CostRates::new(1.0, 1.5, 1.2),
    )
}

fn case_study() -> Result<ProblemInstance, Error> {
    const HEADS: usize = 6;
    const REGULARS: usize = 40;
    const NOT_ELIGIBLE: usize = 17;

    let heads = (0..HEADS).map(|i| {
        let name = format!("Head {}", i + 1);
        Worker::new(i, name, Role::Head, true, 5, 7)
    });
    let regulars = (0..REGULARS).map(|i| {
        let name = format!("Worker {}", i + 1);
        Worker::new(HEADS + i, name, Role::Regular, i >= NOT_ELIGIBLE, 6, 8)
    });

    ProblemInstance::new(
        DAYS,
        SHIFTS_PER_DAY,
        heads.chain(regulars).collect(),
        SlotRequirement::daily(DAYS, &[10, 7, 5]),
        Minimums::new(2, 1, 5),
        CostRates::new(100.0, 150.0, 120.0),
    )
}
