use thiserror::Error;

use crate::data::ExamId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected by a data-entry check, reported back to the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The formatter was handed a successful outcome with no entry for this exam.
    #[error("Assignment for exam {0} is missing from a successful schedule")]
    MissingAssignment(ExamId),
    #[error("Exam {exam} is assigned to teacher index {index}, but only {count} teachers exist")]
    UnknownTeacher {
        exam: ExamId,
        index: usize,
        count: usize,
    },
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse input: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Contract violations are programming errors rather than bad requests.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::MissingAssignment(_) | Error::UnknownTeacher { .. }
        )
    }
}
