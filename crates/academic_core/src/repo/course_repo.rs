//! Course repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD and title search over the `Courses` table.
//! - Resolve `TeacherID` to the teacher's name for listings.
//!
//! # Invariants
//! - A present `teacher_id` must name an existing teacher at write time.
//! - Unassigned (`None`) and dangling teacher ids both list with
//!   `teacher_name = None`.
//! - A NULL `Credits` decodes to `None`.

use super::{
    contains_folded, ensure_store_ready, record_exists, require_reference, search_needle,
    RepoError, RepoResult,
};
use crate::db::Store;
use crate::model::course::{Course, CourseFields, CourseListing};
use crate::model::{RecordId, RecordKind};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COURSE_LISTING_SQL: &str = "SELECT
    C.ID,
    C.Title,
    C.Credits,
    C.TeacherID,
    T.Name AS TeacherName
FROM Courses C
LEFT JOIN Teachers T ON C.TeacherID = T.ID";

/// Repository interface for course operations.
pub trait CourseRepository {
    fn create_course(&self, fields: &CourseFields) -> RepoResult<RecordId>;
    fn update_course(&self, id: RecordId, fields: &CourseFields) -> RepoResult<()>;
    fn delete_course(&self, id: RecordId) -> RepoResult<()>;
    fn get_course(&self, id: RecordId) -> RepoResult<Option<Course>>;
    fn list_courses(&self) -> RepoResult<Vec<CourseListing>>;
    /// Case-insensitive substring match on `title`.
    fn search_courses(&self, title: &str) -> RepoResult<Vec<CourseListing>>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteCourseRepository<'store> {
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        ensure_store_ready(store)?;
        Ok(Self { store })
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn create_course(&self, fields: &CourseFields) -> RepoResult<RecordId> {
        fields.validate()?;

        let conn = self.store.connect()?;
        require_assigned_teacher(&conn, fields)?;
        conn.execute(
            "INSERT INTO Courses (Title, Credits, TeacherID) VALUES (?1, ?2, ?3);",
            params![fields.title.as_str(), fields.credits, fields.teacher_id],
        )?;

        let id = conn.last_insert_rowid();
        debug!("event=record_create module=repo kind=course status=ok id={id}");
        Ok(id)
    }

    fn update_course(&self, id: RecordId, fields: &CourseFields) -> RepoResult<()> {
        fields.validate()?;

        let conn = self.store.connect()?;
        if !record_exists(&conn, RecordKind::Course, id)? {
            return Err(RepoError::NotFound {
                kind: RecordKind::Course,
                id,
            });
        }
        require_assigned_teacher(&conn, fields)?;

        conn.execute(
            "UPDATE Courses
             SET Title = ?1, Credits = ?2, TeacherID = ?3
             WHERE ID = ?4;",
            params![fields.title.as_str(), fields.credits, fields.teacher_id, id],
        )?;

        debug!("event=record_update module=repo kind=course status=ok id={id}");
        Ok(())
    }

    fn delete_course(&self, id: RecordId) -> RepoResult<()> {
        let conn = self.store.connect()?;
        let changed = conn.execute("DELETE FROM Courses WHERE ID = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Course,
                id,
            });
        }

        debug!("event=record_delete module=repo kind=course status=ok id={id}");
        Ok(())
    }

    fn get_course(&self, id: RecordId) -> RepoResult<Option<Course>> {
        let conn = self.store.connect()?;
        let course = conn
            .query_row(
                "SELECT ID, Title, Credits, TeacherID FROM Courses WHERE ID = ?1;",
                [id],
                |row| {
                    Ok(Course {
                        id: row.get("ID")?,
                        title: row.get("Title")?,
                        credits: row.get("Credits")?,
                        teacher_id: row.get("TeacherID")?,
                    })
                },
            )
            .optional()?;
        Ok(course)
    }

    fn list_courses(&self) -> RepoResult<Vec<CourseListing>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!("{COURSE_LISTING_SQL} ORDER BY C.ID ASC;"))?;
        let courses = stmt
            .query_map([], parse_course_listing_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }

    fn search_courses(&self, title: &str) -> RepoResult<Vec<CourseListing>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{COURSE_LISTING_SQL} WHERE {} ORDER BY C.ID ASC;",
            contains_folded("C.Title")
        ))?;
        let courses = stmt
            .query_map([search_needle(title)], parse_course_listing_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }
}

fn require_assigned_teacher(conn: &Connection, fields: &CourseFields) -> RepoResult<()> {
    let Some(teacher_id) = fields.teacher_id else {
        return Ok(());
    };
    require_reference(conn, RecordKind::Teacher, teacher_id).inspect_err(|_| {
        warn!(
            "event=record_write module=repo kind=course status=rejected reason=missing_teacher teacher_id={teacher_id}"
        );
    })
}

fn parse_course_listing_row(row: &Row<'_>) -> rusqlite::Result<CourseListing> {
    Ok(CourseListing {
        id: row.get("ID")?,
        title: row.get("Title")?,
        credits: row.get("Credits")?,
        teacher_id: row.get("TeacherID")?,
        teacher_name: row.get("TeacherName")?,
    })
}
