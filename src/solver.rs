use crate::data::{AssignmentMap, Exam, Teacher};
use log::{debug, info};
use std::time::Instant;

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Tentative assignments made.
    pub nodes: u64,
    /// Times an exam ran out of teachers and the search stepped back.
    pub backtracks: u64,
}

/// Result of a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub success: bool,
    /// Complete when `success` is true, empty otherwise.
    pub assignments: AssignmentMap,
    pub stats: SolveStats,
}

/// Assigns one teacher to every exam with a depth-first backtracking search.
///
/// Exams are visited in list order and, for each exam, teachers are tried in
/// list order, so the first feasible assignment under that ordering is the one
/// returned. The exams' conflict sets must already be built.
///
/// Instead of recursing per exam the search keeps one frame per exam holding
/// the next teacher index to try.
pub fn solve(exams: &[Exam], teachers: &[Teacher]) -> SolveOutcome {
    let start_time = Instant::now();
    info!(
        "Searching for an assignment of {} exams over {} teachers...",
        exams.len(),
        teachers.len()
    );

    let mut assignments = AssignmentMap::new();
    let mut stats = SolveStats::default();
    let mut next_teacher = vec![0usize; exams.len()];
    let mut depth = 0;

    let success = loop {
        if depth == exams.len() {
            break true;
        }

        let exam = &exams[depth];
        // undo the tentative choice made the last time we were at this depth
        assignments.remove(&exam.id);

        let candidate = (next_teacher[depth]..teachers.len())
            .find(|&t| is_assignment_possible(exam, t, teachers, &assignments));

        match candidate {
            Some(t) => {
                assignments.insert(exam.id, t);
                stats.nodes += 1;
                next_teacher[depth] = t + 1;
                depth += 1;
                if let Some(frame) = next_teacher.get_mut(depth) {
                    *frame = 0;
                }
            }
            None => {
                if depth == 0 {
                    break false;
                }
                stats.backtracks += 1;
                depth -= 1;
            }
        }
    };

    debug!(
        "Search finished after {} nodes and {} backtracks.",
        stats.nodes, stats.backtracks
    );
    if success {
        info!("Assignment found in {:.2?}", start_time.elapsed());
    } else {
        info!("No assignment exists; search exhausted in {:.2?}", start_time.elapsed());
    }

    SolveOutcome {
        success,
        assignments,
        stats,
    }
}

// checks availability, then that no already-placed conflicting exam holds this teacher
fn is_assignment_possible(
    exam: &Exam,
    teacher_index: usize,
    teachers: &[Teacher],
    assignments: &AssignmentMap,
) -> bool {
    if !teachers[teacher_index].is_available(&exam.time_slot) {
        return false;
    }

    !exam
        .conflicts
        .iter()
        .any(|other| assignments.get(other) == Some(&teacher_index))
}
