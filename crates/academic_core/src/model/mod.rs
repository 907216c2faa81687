//! Record types for the four academic entities.
//!
//! # Responsibility
//! - Define the caller-supplied field sets and the persisted record shapes.
//! - Own the non-empty name/title invariant.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `RecordId`.
//! - Optional references are `None`, never `0`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod course;
pub mod enrollment;
pub mod student;
pub mod teacher;

/// Store-assigned surrogate id. Never reused, never mutated.
pub type RecordId = i64;

/// Entity discriminator used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Student,
    Teacher,
    Course,
    Enrollment,
}

impl RecordKind {
    /// Lowercase label used in messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for caller-supplied record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required text field is empty or whitespace only.
    EmptyField {
        kind: RecordKind,
        field: &'static str,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { kind, field } => {
                write!(f, "{kind} {field} cannot be empty")
            }
        }
    }
}

impl Error for RecordValidationError {}

pub(crate) fn require_text(
    kind: RecordKind,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::EmptyField { kind, field });
    }
    Ok(())
}
