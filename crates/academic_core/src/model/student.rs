//! Student record.

use super::{require_text, RecordId, RecordKind, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Mutable student fields, supplied on create and on full-replace update.
///
/// Only `name` is required; the other columns are nullable in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub age: Option<i64>,
    /// Business key, unique across all students that have one.
    pub student_code: Option<String>,
    pub major: Option<String>,
}

impl StudentFields {
    pub fn new(
        name: impl Into<String>,
        age: i64,
        student_code: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: Some(age),
            student_code: Some(student_code.into()),
            major: Some(major.into()),
        }
    }

    /// Checks the non-empty name invariant.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(RecordKind::Student, "name", &self.name)
    }
}

/// Persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub age: Option<i64>,
    pub student_code: Option<String>,
    pub major: Option<String>,
}

impl Student {
    /// Returns the mutable part of this record.
    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            age: self.age,
            student_code: self.student_code.clone(),
            major: self.major.clone(),
        }
    }
}
