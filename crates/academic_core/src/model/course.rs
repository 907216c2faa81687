//! Course record and its teacher-resolved listing view.

use super::{require_text, RecordId, RecordKind, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Mutable course fields, supplied on create and on full-replace update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFields {
    pub title: String,
    pub credits: Option<i64>,
    /// `None` means unassigned.
    pub teacher_id: Option<RecordId>,
}

impl CourseFields {
    pub fn new(title: impl Into<String>, credits: i64, teacher_id: Option<RecordId>) -> Self {
        Self {
            title: title.into(),
            credits: Some(credits),
            teacher_id,
        }
    }

    /// Checks the non-empty title invariant.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(RecordKind::Course, "title", &self.title)
    }
}

/// Persisted course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    pub title: String,
    pub credits: Option<i64>,
    pub teacher_id: Option<RecordId>,
}

impl Course {
    pub fn fields(&self) -> CourseFields {
        CourseFields {
            title: self.title.clone(),
            credits: self.credits,
            teacher_id: self.teacher_id,
        }
    }
}

/// Course row joined with its teacher's name.
///
/// `teacher_name` is `None` both for unassigned courses and for courses whose
/// teacher row no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseListing {
    pub id: RecordId,
    pub title: String,
    pub credits: Option<i64>,
    pub teacher_id: Option<RecordId>,
    pub teacher_name: Option<String>,
}
