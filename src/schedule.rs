use log::{info, warn};

use crate::conflict::build_conflict_graph;
use crate::data::{AssignmentMap, Exam, Schedule, Teacher};
use crate::error::Result;
use crate::report::format_report;
use crate::solver;

/// Runs the whole pipeline: conflicts, search, then formatting.
///
/// Works on a private copy of `exams`, so the caller's conflict sets are left
/// untouched. A failed search yields an empty assignment map.
pub fn build_schedule(exams: &[Exam], teachers: &[Teacher]) -> Result<Schedule> {
    let mut exams = exams.to_vec();
    build_conflict_graph(&mut exams);

    let outcome = solver::solve(&exams, teachers);
    let assignments = if outcome.success {
        outcome.assignments
    } else {
        warn!("No valid schedule found with current constraints.");
        AssignmentMap::new()
    };

    let report = format_report(&exams, teachers, outcome.success, &assignments)?;
    info!(
        "Schedule built for {} exams (success: {}).",
        exams.len(),
        outcome.success
    );

    Ok(Schedule {
        success: outcome.success,
        report,
        assignments,
    })
}
