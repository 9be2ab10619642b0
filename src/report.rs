use std::fmt::Write;

use crate::data::{AssignmentMap, Exam, Teacher};
use crate::error::{Error, Result};

pub const SUCCESS_HEADER: &str = "Teacher assignment successful:";
pub const FAILURE_LINE: &str = "No valid schedule found.";

/// Renders the human readable schedule, one line per exam in list order.
///
/// When `success` is false the map is ignored and the single failure line is
/// returned.
pub fn format_report(
    exams: &[Exam],
    teachers: &[Teacher],
    success: bool,
    assignments: &AssignmentMap,
) -> Result<String> {
    if !success {
        return Ok(FAILURE_LINE.to_string());
    }

    let mut report = format!("{SUCCESS_HEADER}\n\n");
    for exam in exams {
        let index = *assignments
            .get(&exam.id)
            .ok_or(Error::MissingAssignment(exam.id))?;
        let teacher = teachers.get(index).ok_or(Error::UnknownTeacher {
            exam: exam.id,
            index,
            count: teachers.len(),
        })?;
        let _ = writeln!(report, "Exam: {exam} -> Teacher: {}", teacher.name);
    }
    Ok(report)
}
