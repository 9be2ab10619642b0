use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// Type aliases for clarity
pub type ExamId = u32;
pub type TeacherId = u32;
pub type TimeSlot = String;

/// Exam id -> index of the assigned teacher in the teacher list at solve time.
pub type AssignmentMap = BTreeMap<ExamId, usize>;

/// An exam that needs one invigilator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: ExamId,
    pub name: String,
    pub time_slot: TimeSlot,
    /// Ids of exams sitting in the same time slot. Filled in by
    /// [`crate::conflict::build_conflict_graph`].
    #[serde(default)]
    pub conflicts: BTreeSet<ExamId>,
}

impl Exam {
    pub fn new(id: ExamId, name: impl Into<String>, time_slot: impl Into<TimeSlot>) -> Self {
        Self {
            id,
            name: name.into(),
            time_slot: time_slot.into(),
            conflicts: BTreeSet::new(),
        }
    }

    /// Two distinct exams conflict when they share a time slot.
    pub fn is_conflict(&self, other: &Exam) -> bool {
        self.id != other.id && self.time_slot == other.time_slot
    }
}

impl fmt::Display for Exam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.time_slot)
    }
}

/// A teacher who can invigilate, along with the slots they cannot take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default)]
    pub unavailable_slots: BTreeSet<TimeSlot>,
}

impl Teacher {
    pub fn new<I, S>(id: TeacherId, name: impl Into<String>, unavailable_slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TimeSlot>,
    {
        Self {
            id,
            name: name.into(),
            unavailable_slots: unavailable_slots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_available(&self, time_slot: &str) -> bool {
        !self.unavailable_slots.contains(time_slot)
    }

    /// Parses a comma separated slot list such as `"9AM, 2PM"`.
    pub fn parse_unavailable(text: &str) -> BTreeSet<TimeSlot> {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The complete input for one scheduling run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
}

impl SchedulingInput {
    /// Checks the shape a data-entry layer is expected to guarantee.
    pub fn validate(&self) -> Result<(), String> {
        let mut exam_ids = BTreeSet::new();
        for exam in &self.exams {
            if !exam_ids.insert(exam.id) {
                return Err(format!("duplicate exam id {}", exam.id));
            }
            if exam.name.trim().is_empty() {
                return Err(format!("exam {} has an empty name", exam.id));
            }
            if exam.time_slot.trim().is_empty() {
                return Err(format!("exam {} has an empty time slot", exam.id));
            }
        }

        let mut teacher_ids = BTreeSet::new();
        for teacher in &self.teachers {
            if !teacher_ids.insert(teacher.id) {
                return Err(format!("duplicate teacher id {}", teacher.id));
            }
            if teacher.name.trim().is_empty() {
                return Err(format!("teacher {} has an empty name", teacher.id));
            }
        }
        Ok(())
    }
}

/// The final output of a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub success: bool,
    pub report: String,
    /// Exam id -> position of the assigned teacher in the submitted teacher
    /// list, not the teacher's `id`. The two agree when ids are handed out
    /// sequentially from 0. Empty whenever `success` is false.
    pub assignments: AssignmentMap,
}
