use chrono::{DateTime, Local};
use log::{debug, info, warn};
use serde::Serialize;

use crate::data::{AssignmentMap, Exam, ExamId, Schedule, Teacher, TeacherId, TimeSlot};
use crate::error::{Error, Result};
use crate::schedule::build_schedule;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A successful schedule kept for later review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub timestamp: String,
    pub details: String,
    pub assignments: AssignmentMap,
}

impl ScheduleRecord {
    pub fn new(details: impl Into<String>, assignments: AssignmentMap) -> Self {
        Self::at(Local::now(), details, assignments)
    }

    pub fn at(
        time: DateTime<Local>,
        details: impl Into<String>,
        assignments: AssignmentMap,
    ) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            details: details.into(),
            assignments,
        }
    }

    /// `"<timestamp> - <first line of the report>"`
    pub fn summary(&self) -> String {
        let headline = self.details.lines().next().unwrap_or_default();
        format!("{} - {}", self.timestamp, headline)
    }
}

/// Copies of a session's entries, tagged with the generation they came from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub exams: Vec<Exam>,
    pub teachers: Vec<Teacher>,
}

/// Exams and teachers entered so far, with sequential ids starting at 0.
///
/// `generation` changes on every [`Session::clear`], so a schedule computed
/// from an older snapshot can be told apart from one matching the current
/// entries.
#[derive(Debug, Default)]
pub struct Session {
    exams: Vec<Exam>,
    teachers: Vec<Teacher>,
    history: Vec<ScheduleRecord>,
    next_exam_id: ExamId,
    next_teacher_id: TeacherId,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn history(&self) -> &[ScheduleRecord] {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn add_exam(&mut self, name: &str, time_slot: &str) -> Result<Exam> {
        let (name, time_slot) = (name.trim(), time_slot.trim());
        if name.is_empty() || time_slot.is_empty() {
            return Err(Error::InvalidInput(
                "Please enter exam name and time slot.".to_string(),
            ));
        }

        let exam = Exam::new(self.next_exam_id, name, time_slot);
        self.next_exam_id += 1;
        info!("Exam added: {exam}");
        self.exams.push(exam.clone());
        Ok(exam)
    }

    pub fn add_teacher<I>(&mut self, name: &str, unavailable_slots: I) -> Result<Teacher>
    where
        I: IntoIterator<Item = TimeSlot>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Please enter teacher name.".to_string()));
        }

        let slots = unavailable_slots
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let teacher = Teacher::new(self.next_teacher_id, name, slots);
        self.next_teacher_id += 1;
        info!(
            "Teacher added: {}, unavailable: {:?}",
            teacher.name, teacher.unavailable_slots
        );
        self.teachers.push(teacher.clone());
        Ok(teacher)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            exams: self.exams.clone(),
            teachers: self.teachers.clone(),
        }
    }

    /// Builds a schedule from the current entries and records it on success.
    pub fn generate(&mut self) -> Result<Schedule> {
        let snapshot = self.snapshot();
        let schedule = solve_snapshot(&snapshot.exams, &snapshot.teachers)?;
        self.record(snapshot.generation, &schedule);
        Ok(schedule)
    }

    /// Appends a successful schedule to the history; failures are not kept,
    /// and neither are schedules solved before the last [`Session::clear`].
    /// Returns whether the schedule was recorded.
    pub fn record(&mut self, generation: u64, schedule: &Schedule) -> bool {
        if !schedule.success {
            return false;
        }
        if generation != self.generation {
            warn!(
                "Dropping schedule from generation {generation}; session is at generation {}.",
                self.generation
            );
            return false;
        }

        let record = ScheduleRecord::new(&schedule.report, schedule.assignments.clone());
        debug!("Recorded schedule: {}", record.summary());
        self.history.push(record);
        true
    }

    pub fn clear(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
        info!("Session cleared.");
    }
}

/// The data-entry guard in front of [`build_schedule`]: a session needs at
/// least one exam and one teacher before it is worth solving.
pub fn solve_snapshot(exams: &[Exam], teachers: &[Teacher]) -> Result<Schedule> {
    if exams.is_empty() || teachers.is_empty() {
        return Err(Error::InvalidInput(
            "Please add at least one exam and one teacher first.".to_string(),
        ));
    }
    build_schedule(exams, teachers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut session = Session::new();
        assert_eq!(session.add_exam("Math", "9AM").unwrap().id, 0);
        assert_eq!(session.add_exam("Physics", "9AM").unwrap().id, 1);
        assert_eq!(session.add_teacher("Smith", vec![]).unwrap().id, 0);
        assert_eq!(session.add_teacher("Jones", vec![]).unwrap().id, 1);
    }

    #[test]
    fn test_add_trims_and_rejects_blank_fields() {
        let mut session = Session::new();
        let exam = session.add_exam("  Math ", " 9AM ").unwrap();
        assert_eq!(exam.name, "Math");
        assert_eq!(exam.time_slot, "9AM");

        assert!(matches!(session.add_exam("", "9AM"), Err(Error::InvalidInput(_))));
        assert!(matches!(session.add_exam("Art", "  "), Err(Error::InvalidInput(_))));
        assert!(matches!(session.add_teacher(" ", vec![]), Err(Error::InvalidInput(_))));
        // rejected entries do not consume ids
        assert_eq!(session.add_exam("Art", "2PM").unwrap().id, 1);
    }

    #[test]
    fn test_teacher_slots_are_trimmed() {
        let mut session = Session::new();
        let teacher = session
            .add_teacher("Smith", vec![" 9AM ".to_string(), "".to_string()])
            .unwrap();
        assert_eq!(teacher.unavailable_slots.len(), 1);
        assert!(!teacher.is_available("9AM"));
    }

    #[test]
    fn test_generate_requires_exams_and_teachers() {
        let mut session = Session::new();
        assert!(matches!(session.generate(), Err(Error::InvalidInput(_))));
        session.add_exam("Math", "9AM").unwrap();
        assert!(matches!(session.generate(), Err(Error::InvalidInput(_))));
        session.add_teacher("Smith", vec![]).unwrap();
        assert!(session.generate().unwrap().success);
    }

    #[test]
    fn test_only_successes_are_recorded() {
        let mut session = Session::new();
        session.add_exam("Math", "9AM").unwrap();
        session.add_teacher("Smith", vec!["9AM".to_string()]).unwrap();

        let schedule = session.generate().unwrap();
        assert!(!schedule.success);
        assert!(session.history().is_empty());

        session.add_teacher("Jones", vec![]).unwrap();
        let schedule = session.generate().unwrap();
        assert!(schedule.success);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].assignments, schedule.assignments);
    }

    #[test]
    fn test_clear_resets_counters_and_history() {
        let mut session = Session::new();
        session.add_exam("Math", "9AM").unwrap();
        session.add_teacher("Smith", vec![]).unwrap();
        session.generate().unwrap();

        session.clear();
        assert!(session.exams().is_empty());
        assert!(session.teachers().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.add_exam("Art", "2PM").unwrap().id, 0);
    }

    #[test]
    fn test_schedule_solved_before_clear_is_not_recorded() {
        let mut session = Session::new();
        session.add_exam("Math", "9AM").unwrap();
        session.add_teacher("Smith", vec![]).unwrap();

        // a solve in flight while another caller clears the session
        let snapshot = session.snapshot();
        let schedule = solve_snapshot(&snapshot.exams, &snapshot.teachers).unwrap();
        assert!(schedule.success);
        session.clear();

        assert!(!session.record(snapshot.generation, &schedule));
        assert!(session.history().is_empty());

        session.add_exam("Art", "2PM").unwrap();
        session.add_teacher("Jones", vec![]).unwrap();
        let snapshot = session.snapshot();
        let schedule = solve_snapshot(&snapshot.exams, &snapshot.teachers).unwrap();
        assert!(session.record(snapshot.generation, &schedule));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_clear_advances_generation() {
        let mut session = Session::new();
        let before = session.generation();
        session.clear();
        session.clear();
        assert_eq!(session.generation(), before + 2);
    }

    #[test]
    fn test_record_summary_uses_first_report_line() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let record = ScheduleRecord::at(
            time,
            "Teacher assignment successful:\n\nExam: Math (9AM) -> Teacher: Smith\n",
            AssignmentMap::from([(0, 0)]),
        );
        assert_eq!(record.timestamp, "2024-05-01 09:30:00");
        assert_eq!(
            record.summary(),
            "2024-05-01 09:30:00 - Teacher assignment successful:"
        );
    }
}
