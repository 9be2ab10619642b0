//! Invigilator assignment: pairs every exam with a teacher so that no teacher
//! sits two exams in the same time slot or a slot they marked unavailable.

pub mod cli;
pub mod conflict;
pub mod data;
pub mod error;
pub mod report;
pub mod schedule;
pub mod server;
pub mod session;
pub mod solver;

pub use data::{AssignmentMap, Exam, ExamId, Schedule, SchedulingInput, Teacher, TeacherId};
pub use error::{Error, Result};
pub use schedule::build_schedule;
