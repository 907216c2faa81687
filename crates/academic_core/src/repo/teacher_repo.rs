//! Teacher repository contract and SQLite implementation.
//!
//! # Invariants
//! - `email` uniqueness is enforced by the store and surfaced as
//!   `ConstraintViolation::DuplicateEmail`.
//! - Deleting a teacher leaves courses pointing at it untouched.
//! - `Department` and `Email` are nullable and decode to `None`.

use super::{
    contains_folded, ensure_store_ready, map_unique_violation, search_needle, ConstraintViolation,
    RepoError, RepoResult,
};
use crate::db::Store;
use crate::model::teacher::{Teacher, TeacherFields};
use crate::model::{RecordId, RecordKind};
use log::{debug, warn};
use rusqlite::{params, OptionalExtension, Row};

const TEACHER_SELECT_SQL: &str = "SELECT ID, Name, Department, Email FROM Teachers";

/// Repository interface for teacher operations.
pub trait TeacherRepository {
    fn create_teacher(&self, fields: &TeacherFields) -> RepoResult<RecordId>;
    fn update_teacher(&self, id: RecordId, fields: &TeacherFields) -> RepoResult<()>;
    fn delete_teacher(&self, id: RecordId) -> RepoResult<()>;
    fn get_teacher(&self, id: RecordId) -> RepoResult<Option<Teacher>>;
    fn list_teachers(&self) -> RepoResult<Vec<Teacher>>;
    fn search_teachers(&self, name: &str) -> RepoResult<Vec<Teacher>>;
}

/// SQLite-backed teacher repository.
pub struct SqliteTeacherRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteTeacherRepository<'store> {
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        ensure_store_ready(store)?;
        Ok(Self { store })
    }
}

impl TeacherRepository for SqliteTeacherRepository<'_> {
    fn create_teacher(&self, fields: &TeacherFields) -> RepoResult<RecordId> {
        fields.validate()?;

        let conn = self.store.connect()?;
        conn.execute(
            "INSERT INTO Teachers (Name, Department, Email) VALUES (?1, ?2, ?3);",
            params![
                fields.name.as_str(),
                fields.department.as_deref(),
                fields.email.as_deref(),
            ],
        )
        .map_err(|err| duplicate_email(err, fields))?;

        let id = conn.last_insert_rowid();
        debug!("event=record_create module=repo kind=teacher status=ok id={id}");
        Ok(id)
    }

    fn update_teacher(&self, id: RecordId, fields: &TeacherFields) -> RepoResult<()> {
        fields.validate()?;

        let conn = self.store.connect()?;
        let changed = conn
            .execute(
                "UPDATE Teachers
                 SET Name = ?1, Department = ?2, Email = ?3
                 WHERE ID = ?4;",
                params![
                    fields.name.as_str(),
                    fields.department.as_deref(),
                    fields.email.as_deref(),
                    id,
                ],
            )
            .map_err(|err| duplicate_email(err, fields))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Teacher,
                id,
            });
        }

        debug!("event=record_update module=repo kind=teacher status=ok id={id}");
        Ok(())
    }

    fn delete_teacher(&self, id: RecordId) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn.execute("DELETE FROM Teachers WHERE ID = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Teacher,
                id,
            });
        }

        debug!("event=record_delete module=repo kind=teacher status=ok id={id}");
        Ok(())
    }

    fn get_teacher(&self, id: RecordId) -> RepoResult<Option<Teacher>> {
        let conn = self.store.connect()?;
        let teacher = conn
            .query_row(
                &format!("{TEACHER_SELECT_SQL} WHERE ID = ?1;"),
                [id],
                parse_teacher_row,
            )
            .optional()?;
        Ok(teacher)
    }

    fn list_teachers(&self) -> RepoResult<Vec<Teacher>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!("{TEACHER_SELECT_SQL} ORDER BY ID ASC;"))?;
        let teachers = stmt
            .query_map([], parse_teacher_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teachers)
    }

    fn search_teachers(&self, name: &str) -> RepoResult<Vec<Teacher>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{TEACHER_SELECT_SQL} WHERE {} ORDER BY ID ASC;",
            contains_folded("Name")
        ))?;
        let teachers = stmt
            .query_map([search_needle(name)], parse_teacher_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teachers)
    }
}

fn duplicate_email(err: rusqlite::Error, fields: &TeacherFields) -> RepoError {
    let mapped = map_unique_violation(err, || {
        ConstraintViolation::DuplicateEmail(fields.email.clone().unwrap_or_default())
    });
    if matches!(mapped, RepoError::ConstraintViolation(_)) {
        warn!("event=record_write module=repo kind=teacher status=rejected reason=duplicate_email");
    }
    mapped
}

fn parse_teacher_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get("ID")?,
        name: row.get("Name")?,
        department: row.get("Department")?,
        email: row.get("Email")?,
    })
}
