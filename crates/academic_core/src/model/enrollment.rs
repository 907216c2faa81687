//! Enrollment join record.
//!
//! # Invariants
//! - `enrollment_date` is stamped by the repository at creation and never
//!   changes afterwards.
//! - `grade` is the only field that can be patched.
//! - Every column besides `id` is nullable in the store, so rows written by
//!   older tools decode with `None` in place of missing values.

use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted enrollment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: RecordId,
    pub student_id: Option<RecordId>,
    pub course_id: Option<RecordId>,
    pub enrollment_date: Option<NaiveDate>,
    pub grade: Option<String>,
}

/// Enrollment row with student and course resolved to display names.
///
/// Dangling references resolve to `None` rather than failing the listing.
/// So does an `EnrollmentDate` that is missing or not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentListing {
    pub id: RecordId,
    pub student_id: Option<RecordId>,
    pub course_id: Option<RecordId>,
    pub student_name: Option<String>,
    pub course_title: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub grade: Option<String>,
}
