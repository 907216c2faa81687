//! Teacher record.

use super::{require_text, RecordId, RecordKind, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Mutable teacher fields, supplied on create and on full-replace update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherFields {
    pub name: String,
    pub department: Option<String>,
    /// Business key, unique across all teachers that have one.
    pub email: Option<String>,
}

impl TeacherFields {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            department: Some(department.into()),
            email: Some(email.into()),
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(RecordKind::Teacher, "name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: RecordId,
    pub name: String,
    pub department: Option<String>,
    pub email: Option<String>,
}

impl Teacher {
    pub fn fields(&self) -> TeacherFields {
        TeacherFields {
            name: self.name.clone(),
            department: self.department.clone(),
            email: self.email.clone(),
        }
    }
}
