//! Enrollment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Link students to courses, stamping the enrollment date at insert.
//! - Patch grades and list enrollments with resolved display names.
//!
//! # Invariants
//! - `EnrollmentDate` is written once, from the local clock, as `YYYY-MM-DD`.
//! - Only `Grade` is mutable after creation.
//! - Student/course rows deleted later leave the enrollment in place; the
//!   listing resolves them to `None`.
//! - Listings never fail on one row's missing or malformed `EnrollmentDate`;
//!   that row lists with `enrollment_date = None`.

use super::{
    contains_folded, ensure_store_ready, require_reference, search_needle, RepoError, RepoResult,
};
use crate::db::Store;
use crate::model::enrollment::{Enrollment, EnrollmentListing};
use crate::model::{RecordId, RecordKind};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use rusqlite::{params, OptionalExtension, Row};

const ENROLLMENT_DATE_FORMAT: &str = "%Y-%m-%d";

const ENROLLMENT_LISTING_SQL: &str = "SELECT
    E.ID,
    E.StudentID,
    E.CourseID,
    S.Name AS StudentName,
    C.Title AS CourseTitle,
    E.EnrollmentDate,
    E.Grade
FROM Enrollments E
LEFT JOIN Students S ON E.StudentID = S.ID
LEFT JOIN Courses C ON E.CourseID = C.ID";

/// Repository interface for enrollment operations.
pub trait EnrollmentRepository {
    /// Enrolls a student in a course dated today. Grade starts empty.
    fn enroll_student(&self, student_id: RecordId, course_id: RecordId) -> RepoResult<RecordId>;
    /// Replaces the grade only; `None` clears it.
    fn update_enrollment_grade(&self, id: RecordId, grade: Option<&str>) -> RepoResult<()>;
    fn delete_enrollment(&self, id: RecordId) -> RepoResult<()>;
    fn get_enrollment(&self, id: RecordId) -> RepoResult<Option<Enrollment>>;
    fn list_enrollments(&self) -> RepoResult<Vec<EnrollmentListing>>;
    /// Case-insensitive substring match on student name or course title.
    fn search_enrollments(&self, text: &str) -> RepoResult<Vec<EnrollmentListing>>;
}

/// SQLite-backed enrollment repository.
pub struct SqliteEnrollmentRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteEnrollmentRepository<'store> {
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        ensure_store_ready(store)?;
        Ok(Self { store })
    }
}

impl EnrollmentRepository for SqliteEnrollmentRepository<'_> {
    fn enroll_student(&self, student_id: RecordId, course_id: RecordId) -> RepoResult<RecordId> {
        let conn = self.store.connect()?;
        require_reference(&conn, RecordKind::Student, student_id)?;
        require_reference(&conn, RecordKind::Course, course_id)?;

        let enrollment_date = Local::now().date_naive();
        conn.execute(
            "INSERT INTO Enrollments (StudentID, CourseID, EnrollmentDate)
             VALUES (?1, ?2, ?3);",
            params![
                student_id,
                course_id,
                enrollment_date.format(ENROLLMENT_DATE_FORMAT).to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(
            "event=record_create module=repo kind=enrollment status=ok id={id} enrollment_date={enrollment_date}"
        );
        Ok(id)
    }

    fn update_enrollment_grade(&self, id: RecordId, grade: Option<&str>) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn.execute(
            "UPDATE Enrollments SET Grade = ?1 WHERE ID = ?2;",
            params![grade, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Enrollment,
                id,
            });
        }

        debug!("event=record_update module=repo kind=enrollment status=ok id={id} field=grade");
        Ok(())
    }

    fn delete_enrollment(&self, id: RecordId) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn.execute("DELETE FROM Enrollments WHERE ID = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Enrollment,
                id,
            });
        }

        debug!("event=record_delete module=repo kind=enrollment status=ok id={id}");
        Ok(())
    }

    fn get_enrollment(&self, id: RecordId) -> RepoResult<Option<Enrollment>> {
        let conn = self.store.connect()?;
        let row = conn
            .query_row(
                "SELECT ID, StudentID, CourseID, EnrollmentDate, Grade
                 FROM Enrollments
                 WHERE ID = ?1;",
                [id],
                |row| {
                    Ok((
                        row.get::<_, RecordId>("ID")?,
                        row.get::<_, Option<RecordId>>("StudentID")?,
                        row.get::<_, Option<RecordId>>("CourseID")?,
                        row.get::<_, Option<String>>("EnrollmentDate")?,
                        row.get::<_, Option<String>>("Grade")?,
                    ))
                },
            )
            .optional()?;

        let Some((id, student_id, course_id, date_text, grade)) = row else {
            return Ok(None);
        };

        Ok(Some(Enrollment {
            id,
            student_id,
            course_id,
            enrollment_date: date_text
                .as_deref()
                .map(parse_enrollment_date)
                .transpose()?,
            grade,
        }))
    }

    fn list_enrollments(&self) -> RepoResult<Vec<EnrollmentListing>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!("{ENROLLMENT_LISTING_SQL} ORDER BY E.ID ASC;"))?;
        let enrollments = stmt
            .query_map([], parse_enrollment_listing_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(enrollments)
    }

    fn search_enrollments(&self, text: &str) -> RepoResult<Vec<EnrollmentListing>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{ENROLLMENT_LISTING_SQL}
             WHERE {} OR {}
             ORDER BY E.ID ASC;",
            contains_folded("S.Name"),
            contains_folded("C.Title")
        ))?;
        let enrollments = stmt
            .query_map([search_needle(text)], parse_enrollment_listing_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(enrollments)
    }
}

fn parse_enrollment_listing_row(row: &Row<'_>) -> rusqlite::Result<EnrollmentListing> {
    let id: RecordId = row.get("ID")?;
    let date_text: Option<String> = row.get("EnrollmentDate")?;
    let enrollment_date = date_text.as_deref().and_then(|value| {
        parse_enrollment_date(value)
            .inspect_err(|_| {
                warn!("event=record_read module=repo kind=enrollment status=degraded reason=invalid_date id={id}");
            })
            .ok()
    });

    Ok(EnrollmentListing {
        id,
        student_id: row.get("StudentID")?,
        course_id: row.get("CourseID")?,
        student_name: row.get("StudentName")?,
        course_title: row.get("CourseTitle")?,
        enrollment_date,
        grade: row.get("Grade")?,
    })
}

fn parse_enrollment_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, ENROLLMENT_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{value}` in Enrollments.EnrollmentDate"
        ))
    })
}
