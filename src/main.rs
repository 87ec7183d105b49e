use clap::{Parser, Subcommand, ValueEnum};
use rand::prelude::*;
use staff_scheduling::algo::{self, SolverConfig, DEFAULT_ITERATIONS};
use staff_scheduling::core::{
    CostRates, Minimums, ProblemInstance, Role, ShiftType, SlotRequirement, Solver, Worker,
};
use staff_scheduling::data::{self, Dataset};
use staff_scheduling::{print_solution, run_reader};
use std::fs::File;
use std::io::{BufReader, Write};
use std::num::NonZero;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Copy, Clone, Debug)]
struct Algorithm(usize, &'static str);

impl Algorithm {
    fn build(self, config: &SolverConfig) -> Box<dyn Solver> {
        algo::SOLVERS[self.0](config)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<Algorithm>> = std::sync::LazyLock::new(|| {
            let config = SolverConfig::seeded(0, 0);
            let iter = algo::SOLVERS.iter().enumerate();
            iter.map(|(i, init)| Algorithm(i, init(&config).name())).collect()
        });

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Heuristic staff shift scheduler.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Application {
    /// Seed of the random source. Runs differ from each other without it.
    #[clap(short, long, global = true)]
    seed: Option<u64>,
    /// Number of local search iterations.
    #[clap(short, long, global = true, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Print the solution as JSON instead of the text report.
    #[clap(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve an instance read as JSON from a file or stdin.
    Run {
        algorithm: Algorithm,
        /// The instance file. Reads stdin when missing.
        input: Option<PathBuf>,
    },
    /// Solve one of the built-in instances.
    Sample {
        dataset: Dataset,
        #[clap(short, long, default_value = "HillClimbing")]
        algorithm: Algorithm,
        /// Print the instance as JSON instead of solving it.
        #[clap(short, long)]
        export: bool,
    },
    /// Run benchmarks on a directory of instances.
    Bench {
        /// The input directory.
        input: PathBuf,
        /// Exclude solvers.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<Algorithm>,
    },
    /// Generate random instances.
    Gen {
        /// The number of head workers.
        heads: usize,
        /// The number of regular workers.
        regulars: NonZero<usize>,
        /// The number of days.
        #[clap(short, long, default_value = "7")]
        days: NonZero<usize>,
        /// Number of instances to generate.
        #[clap(short, long, default_value = "1")]
        amount: NonZero<u64>,
        /// Path to output the generated instances. If the directory does not exist, it will be created.
        #[clap(short, long, default_value = "output")]
        output: PathBuf,
    },
}

fn solvers<'a>(
    config: &'a SolverConfig,
    exclude: &'a [Algorithm],
) -> impl Iterator<Item = Box<dyn Solver>> + 'a {
    let iter = algo::SOLVERS.iter().map(|init| init(config));
    iter.filter(|solver| !exclude.iter().any(|name| name.1 == solver.name()))
}

fn gen_workers(rng: &mut impl Rng, heads: usize, regulars: usize, days: usize) -> Vec<Worker> {
    let head_workers = (0..heads).map(|i| (i, format!("Head {}", i + 1), Role::Head));
    let regular_workers =
        (0..regulars).map(|i| (heads + i, format!("Worker {}", i + 1), Role::Regular));

    head_workers
        .chain(regular_workers)
        .map(|(id, name, role)| {
            let min_shifts = rng.gen_range(days / 2..=days * 5 / 7);
            let max_shifts = min_shifts + rng.gen_range(0..=2);
            let eligible = role == Role::Head || rng.gen_bool(0.5);
            Worker::new(id, name, role, eligible, min_shifts, max_shifts)
        })
        .collect()
}

fn gen_requirements(rng: &mut impl Rng, workers: &[Worker], days: usize) -> Vec<SlotRequirement> {
    let heads = workers.iter().filter(|worker| worker.role == Role::Head).count();
    let regulars = workers.len() - heads;
    let capacity = |shift: ShiftType| match shift {
        ShiftType::Morning => heads + regulars / 3,
        ShiftType::Afternoon | ShiftType::Night => regulars / 3,
    };

    (0..days)
        .flat_map(|day| ShiftType::ALL.map(|shift| (day, shift)))
        .map(|(day, shift)| {
            let required = rng.gen_range(1..=capacity(shift).max(1));
            SlotRequirement::new(day, shift, required)
        })
        .collect()
}

fn gen(
    rng: &mut impl Rng,
    heads: usize,
    regulars: usize,
    days: usize,
) -> anyhow::Result<ProblemInstance> {
    let workers = gen_workers(rng, heads, regulars, days);
    let slots = gen_requirements(rng, &workers, days);
    let minimums = Minimums::new(rng.gen_range(0..=2), rng.gen_range(0..=2), days / 2);
    let rates = CostRates::new(100.0, 150.0, 120.0);
    Ok(ProblemInstance::new(days, ShiftType::ALL.len(), workers, slots, minimums, rates)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let application = Application::parse();
    let config = SolverConfig::new(application.iterations, application.seed);

    match application.command {
        Command::Run { algorithm, input } => {
            let mut solver = algorithm.build(&config);
            match input {
                Some(path) => {
                    let mut reader = BufReader::new(File::open(path)?);
                    run_reader(solver.as_mut(), &mut reader, application.json)
                }
                None => run_reader(solver.as_mut(), &mut std::io::stdin().lock(), application.json),
            }
        }
        Command::Sample {
            dataset,
            algorithm,
            export,
        } => {
            let instance = dataset.instance()?;
            if export {
                println!("{}", data::to_string(&instance)?);
                return Ok(());
            }
            let solution = algorithm.build(&config).solve(&instance);
            print_solution(&instance, &solution, application.json)
        }
        Command::Bench { input, exclude } => {
            for mut solver in solvers(&config, &exclude) {
                println!("{}", data::run(&input, solver.as_mut())?);
            }
            Ok(())
        }
        Command::Gen {
            heads,
            regulars,
            days,
            amount,
            output,
        } => {
            if !output.try_exists()? {
                std::fs::create_dir_all(&output)?;
            }

            let mut rng = config.rng();
            for i in 0..amount.get() {
                let instance = gen(&mut rng, heads, regulars.get(), days.get())?;
                let filename = format!("{heads}_{regulars}_{days}_{i}.json");
                std::fs::File::create(output.join(filename))?
                    .write_all(data::to_string(&instance)?.as_bytes())?;
            }
            Ok(())
        }
    }
}
