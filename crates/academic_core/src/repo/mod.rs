//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Translate per-entity CRUD/search use-cases into parameterized SQL.
//! - Map store failures into the semantic error taxonomy below.
//!
//! # Invariants
//! - Every repository call opens its own connection from the `Store` and
//!   drops it before returning.
//! - Write paths validate fields and references before SQL mutations.
//! - Update/delete on a missing id report `NotFound` instead of succeeding.
//! - Search never fails on "no match"; it returns an empty vector.
//! - Search folds case with Unicode rules via the `fold_case` SQL function.

use crate::db::migrations::{current_user_version, latest_version, REQUIRED_TABLES};
use crate::db::{DbError, Store, FOLD_CASE_FN};
use crate::model::{RecordId, RecordKind, RecordValidationError};
use rusqlite::{ffi, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod course_repo;
pub mod enrollment_repo;
pub mod student_repo;
pub mod teacher_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Business-rule violation detected on create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Another student already uses this student code.
    DuplicateStudentCode(String),
    /// Another teacher already uses this email.
    DuplicateEmail(String),
    /// A referenced row does not exist.
    MissingReference { kind: RecordKind, id: RecordId },
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateStudentCode(code) => {
                write!(f, "student code `{code}` is already in use")
            }
            Self::DuplicateEmail(email) => write!(f, "email `{email}` is already in use"),
            Self::MissingReference { kind, id } => {
                write!(f, "referenced {kind} {id} does not exist")
            }
        }
    }
}

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    ConstraintViolation(ConstraintViolation),
    NotFound {
        kind: RecordKind,
        id: RecordId,
    },
    /// Store unavailable: open, I/O or statement failure.
    Db(DbError),
    /// The store has not been through `ensure_schema`.
    UninitializedStore {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ConstraintViolation(violation) => {
                write!(f, "constraint violation: {violation}")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedStore {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store schema is not ready: expected version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "store is missing required table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::ConstraintViolation(_)
            | Self::NotFound { .. }
            | Self::UninitializedStore { .. }
            | Self::MissingRequiredTable(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ConstraintViolation> for RepoError {
    fn from(value: ConstraintViolation) -> Self {
        Self::ConstraintViolation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::InvalidColumnType(_, name, kind) => {
                Self::InvalidData(format!("column `{name}` holds an unexpected {kind} value"))
            }
            rusqlite::Error::FromSqlConversionFailure(index, kind, err) => Self::InvalidData(
                format!("column {index} holds an unconvertible {kind} value: {err}"),
            ),
            rusqlite::Error::IntegralValueOutOfRange(index, value) => {
                Self::InvalidData(format!("column {index} value {value} is out of range"))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Verifies that `ensure_schema` has run against the store behind `store`.
///
/// Repository constructors call this once so that later calls fail with
/// a semantic error instead of "no such table".
pub fn ensure_store_ready(store: &Store) -> RepoResult<()> {
    let conn = store.connect()?;
    let expected_version = latest_version();
    let actual_version = current_user_version(&conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedStore {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(&conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

pub(crate) fn table_name(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Student => "Students",
        RecordKind::Teacher => "Teachers",
        RecordKind::Course => "Courses",
        RecordKind::Enrollment => "Enrollments",
    }
}

pub(crate) fn record_exists(
    conn: &Connection,
    kind: RecordKind,
    id: RecordId,
) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE ID = ?1);",
            table_name(kind)
        ),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Fails with `MissingReference` when `id` does not name an existing row.
pub(crate) fn require_reference(
    conn: &Connection,
    kind: RecordKind,
    id: RecordId,
) -> RepoResult<()> {
    if record_exists(conn, kind, id)? {
        return Ok(());
    }
    Err(ConstraintViolation::MissingReference { kind, id }.into())
}

/// Maps a UNIQUE constraint failure to `violation`, anything else to `Db`.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    violation: impl FnOnce() -> ConstraintViolation,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::ConstraintViolation(violation())
        }
        _ => err.into(),
    }
}

/// SQL predicate: `column` contains the `?1` needle, ignoring case.
///
/// Bind the needle through [`search_needle`]. NULL columns never match.
pub(crate) fn contains_folded(column: &str) -> String {
    format!("instr({FOLD_CASE_FN}({column}), ?1) > 0")
}

/// Case-folds user search text the same way the store folds column values.
pub(crate) fn search_needle(text: &str) -> String {
    text.to_lowercase()
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
