//! Persistence and data-integrity layer for the academic records manager.
//! Owns the store schema and every business invariant on the four record types.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{ensure_schema, DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::course::{Course, CourseFields, CourseListing};
pub use model::enrollment::{Enrollment, EnrollmentListing};
pub use model::student::{Student, StudentFields};
pub use model::teacher::{Teacher, TeacherFields};
pub use model::{RecordId, RecordKind, RecordValidationError};
pub use repo::course_repo::{CourseRepository, SqliteCourseRepository};
pub use repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::teacher_repo::{SqliteTeacherRepository, TeacherRepository};
pub use repo::{ensure_store_ready, ConstraintViolation, RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
