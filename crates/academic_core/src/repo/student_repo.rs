//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD, listing and name search over the `Students` table.
//!
//! # Invariants
//! - `student_code` uniqueness is enforced by the store and surfaced as
//!   `ConstraintViolation::DuplicateStudentCode`.
//! - Update replaces every mutable field.
//! - Nullable columns decode to `None`; a NULL never fails a listing.

use super::{
    contains_folded, ensure_store_ready, map_unique_violation, search_needle, ConstraintViolation,
    RepoError, RepoResult,
};
use crate::db::Store;
use crate::model::student::{Student, StudentFields};
use crate::model::{RecordId, RecordKind};
use log::{debug, warn};
use rusqlite::{params, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT ID, Name, Age, StudentID, Major FROM Students";

/// Repository interface for student operations.
pub trait StudentRepository {
    fn create_student(&self, fields: &StudentFields) -> RepoResult<RecordId>;
    fn update_student(&self, id: RecordId, fields: &StudentFields) -> RepoResult<()>;
    fn delete_student(&self, id: RecordId) -> RepoResult<()>;
    fn get_student(&self, id: RecordId) -> RepoResult<Option<Student>>;
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Case-insensitive substring match on `name`.
    fn search_students(&self, name: &str) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteStudentRepository<'store> {
    /// Constructs a repository over a schema-ready store.
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        ensure_store_ready(store)?;
        Ok(Self { store })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, fields: &StudentFields) -> RepoResult<RecordId> {
        fields.validate()?;

        let conn = self.store.connect()?;
        conn.execute(
            "INSERT INTO Students (Name, Age, StudentID, Major) VALUES (?1, ?2, ?3, ?4);",
            params![
                fields.name.as_str(),
                fields.age,
                fields.student_code.as_deref(),
                fields.major.as_deref(),
            ],
        )
        .map_err(|err| duplicate_code(err, fields))?;

        let id = conn.last_insert_rowid();
        debug!("event=record_create module=repo kind=student status=ok id={id}");
        Ok(id)
    }

    fn update_student(&self, id: RecordId, fields: &StudentFields) -> RepoResult<()> {
        fields.validate()?;

        let conn = self.store.connect()?;
        let changed = conn
            .execute(
                "UPDATE Students
                 SET Name = ?1, Age = ?2, StudentID = ?3, Major = ?4
                 WHERE ID = ?5;",
                params![
                    fields.name.as_str(),
                    fields.age,
                    fields.student_code.as_deref(),
                    fields.major.as_deref(),
                    id,
                ],
            )
            .map_err(|err| duplicate_code(err, fields))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Student,
                id,
            });
        }

        debug!("event=record_update module=repo kind=student status=ok id={id}");
        Ok(())
    }

    fn delete_student(&self, id: RecordId) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn.execute("DELETE FROM Students WHERE ID = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Student,
                id,
            });
        }

        debug!("event=record_delete module=repo kind=student status=ok id={id}");
        Ok(())
    }

    fn get_student(&self, id: RecordId) -> RepoResult<Option<Student>> {
        let conn = self.store.connect()?;
        let student = conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE ID = ?1;"),
                [id],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY ID ASC;"))?;
        let students = stmt
            .query_map([], parse_student_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    fn search_students(&self, name: &str) -> RepoResult<Vec<Student>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{STUDENT_SELECT_SQL} WHERE {} ORDER BY ID ASC;",
            contains_folded("Name")
        ))?;
        let students = stmt
            .query_map([search_needle(name)], parse_student_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }
}

fn duplicate_code(err: rusqlite::Error, fields: &StudentFields) -> RepoError {
    let mapped = map_unique_violation(err, || {
        ConstraintViolation::DuplicateStudentCode(fields.student_code.clone().unwrap_or_default())
    });
    if matches!(mapped, RepoError::ConstraintViolation(_)) {
        warn!("event=record_write module=repo kind=student status=rejected reason=duplicate_student_code");
    }
    mapped
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("ID")?,
        name: row.get("Name")?,
        age: row.get("Age")?,
        student_code: row.get("StudentID")?,
        major: row.get("Major")?,
    })
}
