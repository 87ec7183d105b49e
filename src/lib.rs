#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::BufRead;

pub mod algo;
pub mod core;
pub mod data;

/// Runs the given solver on the instance read from reader and writes the result to stdout.
/// The result is either the text report or, when `json` is set, the serialized solution.
///
/// # Errors
/// - If the instance could not be read from the reader or is invalid.
/// - If the solution could not be serialized.
///
/// # Panics
///  - If the schedule does not match the instance in debug mode.
pub fn run_reader(solver: &mut dyn core::Solver, reader: &mut impl BufRead, json: bool) -> Result<()> {
    let instance: core::ProblemInstance = data::deserialize(reader)?;
    let solution = solver.solve(&instance);

    debug_assert!(
        solution.schedule.fits(&instance),
        "Schedule does not match the instance: {solution:?}"
    );

    print_solution(&instance, &solution, json)
}

/// Writes the solution to stdout, either as JSON or as the text report.
///
/// # Errors
/// - If the solution could not be serialized.
pub fn print_solution(
    instance: &core::ProblemInstance,
    solution: &core::Solution,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", data::to_string(solution)?);
    } else {
        print!("{}", data::ScheduleReport::new(instance, solution));
    }
    Ok(())
}

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Must be 64-bit system!");

/// Casts the given value to `u64`.
/// It should never fail on 64-bit systems.
///
/// # Panics
/// - If the value cannot be cast to `u64`.
#[must_use]
pub fn cast_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or_else(|_| unreachable!("Must be 64-bit system!"))
}

/// Casts the given count to `f64`.
/// Shift counts are far below 2^52, so the conversion is exact.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn cast_f64(value: usize) -> f64 {
    value as f64
}
