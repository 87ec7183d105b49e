use crate::core::{ProblemInstance, Solver};
use crate::data::deserialize;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Report of solving a directory of instances.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    solver: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    fn new(solver: String) -> Self {
        let entries = Vec::new();
        Self { solver, entries }
    }

    /// Get the solver name.
    #[must_use]
    pub fn solver_name(&self) -> &str {
        &self.solver
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Solver: {}", self.solver)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Result of solving a single instance.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub violations: u64,
    pub cost: f64,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}: {} violations, cost {:.2} in {:.2} sec",
            self.name, self.violations, self.cost, self.time
        )
    }
}

/// Solve every `*.json` instance in the `dir` directory.
/// Entries are ordered by file name.
///
/// # Errors
/// - If the directory or a file cannot be read.
/// - If a file does not hold a valid instance.
pub fn run(dir: impl AsRef<Path>, solver: &mut dyn Solver) -> anyhow::Result<Report> {
    let mut report = Report::new(solver.name().into());

    let mut paths = Vec::new();
    for file in std::fs::read_dir(dir)? {
        let path = file?.path();
        if path.extension().is_some_and(|extension| extension == "json") {
            paths.push(path);
        } else {
            warn!(path = %path.display(), "skipping non-instance file");
        }
    }
    paths.sort_unstable();

    for path in paths {
        let name = path
            .file_name()
            .and_then(std::ffi::OsStr::to_str)
            .ok_or_else(|| anyhow!("Cannot read filename {}", path.display()))?
            .to_owned();
        let instance: ProblemInstance = deserialize(&mut BufReader::new(File::open(&path)?))
            .map_err(|err| anyhow!("{name}: {err}"))?;

        let time = std::time::Instant::now();
        let solution = solver.solve(&instance);
        let time = time.elapsed().as_secs_f64();

        assert!(solution.schedule.fits(&instance), "Invalid schedule created");
        info!(name = %name, violations = solution.violations, "solved benchmark instance");

        report.entries.push(ReportEntry {
            name,
            violations: solution.violations,
            cost: solution.cost.total,
            time,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::Greedy;
    use crate::data::{to_string, Dataset};

    #[test]
    fn test_run_directory() -> anyhow::Result<()> {
        let name = format!("staff-scheduling-run-{}", std::process::id());
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("b_small.json"), to_string(&Dataset::Small.instance()?)?)?;
        std::fs::write(dir.join("a_case.json"), to_string(&Dataset::CaseStudy.instance()?)?)?;
        std::fs::write(dir.join("notes.txt"), "not an instance")?;

        let report = run(&dir, &mut Greedy::new(0));
        std::fs::remove_dir_all(&dir)?;
        let report = report?;

        assert_eq!(report.solver_name(), "Greedy");
        let names: Vec<_> = report.entries().iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["a_case.json", "b_small.json"]);
        assert!(report.entries().iter().all(|entry| entry.cost > 0.0));
        Ok(())
    }

    #[test]
    fn invalid_instance_is_an_error() -> anyhow::Result<()> {
        let name = format!("staff-scheduling-bad-{}", std::process::id());
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("broken.json"), "{\"num_days\": 1}")?;

        let report = run(&dir, &mut Greedy::new(0));
        std::fs::remove_dir_all(&dir)?;

        let message = report.err().map(|err| err.to_string()).unwrap_or_default();
        assert!(message.starts_with("broken.json"), "{message}");
        Ok(())
    }
}
