use academic_core::{
    ensure_schema, ConstraintViolation, CourseFields, CourseRepository, EnrollmentRepository,
    RecordKind, RepoError, SqliteCourseRepository, SqliteEnrollmentRepository,
    SqliteStudentRepository, Store, StudentFields, StudentRepository,
};
use chrono::Local;
use rusqlite::Connection;
use tempfile::TempDir;

fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = ensure_schema(dir.path().join("academicDB.db")).unwrap();
    (dir, store)
}

#[test]
fn enroll_update_grade_and_list_scenario() {
    let (_dir, store) = open_store();
    let students = SqliteStudentRepository::try_new(&store).unwrap();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let student_id = students
        .create_student(&StudentFields::new("Ana Li", 20, "S100", "CS"))
        .unwrap();
    let course_id = courses
        .create_course(&CourseFields::new("Algorithms", 4, None))
        .unwrap();
    assert_eq!((student_id, course_id), (1, 1));

    let today = Local::now().date_naive();
    let enrollment_id = enrollments.enroll_student(student_id, course_id).unwrap();
    assert_eq!(enrollment_id, 1);

    let created = enrollments.get_enrollment(enrollment_id).unwrap().unwrap();
    assert_eq!(created.student_id, Some(student_id));
    assert_eq!(created.course_id, Some(course_id));
    assert_eq!(created.enrollment_date, Some(today));
    assert_eq!(created.grade, None);

    enrollments
        .update_enrollment_grade(enrollment_id, Some("A"))
        .unwrap();

    let listing = enrollments.list_enrollments().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, enrollment_id);
    assert_eq!(listing[0].student_name.as_deref(), Some("Ana Li"));
    assert_eq!(listing[0].course_title.as_deref(), Some("Algorithms"));
    assert_eq!(listing[0].enrollment_date, Some(today));
    assert_eq!(listing[0].grade.as_deref(), Some("A"));
}

#[test]
fn enrollment_date_is_stored_as_iso_text_and_survives_grade_updates() {
    let (dir, store) = open_store();
    let (student_id, course_id) = seed_student_and_course(&store);
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let id = enrollments.enroll_student(student_id, course_id).unwrap();
    enrollments.update_enrollment_grade(id, Some("B+")).unwrap();
    enrollments.update_enrollment_grade(id, None).unwrap();

    let conn = Connection::open(dir.path().join("academicDB.db")).unwrap();
    let (date_text, grade): (String, Option<String>) = conn
        .query_row(
            "SELECT EnrollmentDate, Grade FROM Enrollments WHERE ID = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(
        date_text,
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    );
    assert_eq!(grade, None);
}

#[test]
fn missing_student_or_course_is_rejected() {
    let (_dir, store) = open_store();
    let (student_id, course_id) = seed_student_and_course(&store);
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let err = enrollments.enroll_student(99, course_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation(ConstraintViolation::MissingReference {
            kind: RecordKind::Student,
            id: 99
        })
    ));

    let err = enrollments.enroll_student(student_id, 98).unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation(ConstraintViolation::MissingReference {
            kind: RecordKind::Course,
            id: 98
        })
    ));

    assert!(enrollments.list_enrollments().unwrap().is_empty());
}

#[test]
fn grade_update_and_delete_on_missing_id_return_not_found() {
    let (_dir, store) = open_store();
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    assert!(matches!(
        enrollments
            .update_enrollment_grade(4, Some("A"))
            .unwrap_err(),
        RepoError::NotFound {
            kind: RecordKind::Enrollment,
            id: 4
        }
    ));
    assert!(matches!(
        enrollments.delete_enrollment(4).unwrap_err(),
        RepoError::NotFound { id: 4, .. }
    ));
}

#[test]
fn deleting_student_and_course_leaves_dangling_enrollment() {
    let (_dir, store) = open_store();
    let (student_id, course_id) = seed_student_and_course(&store);
    let students = SqliteStudentRepository::try_new(&store).unwrap();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let id = enrollments.enroll_student(student_id, course_id).unwrap();
    students.delete_student(student_id).unwrap();
    courses.delete_course(course_id).unwrap();

    let listing = enrollments.list_enrollments().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, id);
    assert_eq!(listing[0].student_id, Some(student_id));
    assert_eq!(listing[0].student_name, None);
    assert_eq!(listing[0].course_title, None);
}

#[test]
fn delete_removes_enrollment() {
    let (_dir, store) = open_store();
    let (student_id, course_id) = seed_student_and_course(&store);
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let id = enrollments.enroll_student(student_id, course_id).unwrap();
    enrollments.delete_enrollment(id).unwrap();

    assert!(enrollments.get_enrollment(id).unwrap().is_none());
    assert!(enrollments.list_enrollments().unwrap().is_empty());
}

#[test]
fn search_matches_student_name_or_course_title() {
    let (_dir, store) = open_store();
    let students = SqliteStudentRepository::try_new(&store).unwrap();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let ana = students
        .create_student(&StudentFields::new("Ana Li", 20, "S100", "CS"))
        .unwrap();
    let bo = students
        .create_student(&StudentFields::new("Bo Chen", 22, "S200", "Math"))
        .unwrap();
    let algorithms = courses
        .create_course(&CourseFields::new("Algorithms", 4, None))
        .unwrap();
    let poetry = courses
        .create_course(&CourseFields::new("Poetry", 2, None))
        .unwrap();

    enrollments.enroll_student(ana, algorithms).unwrap();
    enrollments.enroll_student(bo, poetry).unwrap();

    let by_student = enrollments.search_enrollments("ana").unwrap();
    assert_eq!(by_student.len(), 1);
    assert_eq!(by_student[0].course_title.as_deref(), Some("Algorithms"));

    let by_course = enrollments.search_enrollments("POET").unwrap();
    assert_eq!(by_course.len(), 1);
    assert_eq!(by_course[0].student_name.as_deref(), Some("Bo Chen"));

    assert_eq!(enrollments.search_enrollments("").unwrap().len(), 2);
    assert!(enrollments.search_enrollments("xyz").unwrap().is_empty());
}

#[test]
fn malformed_persisted_date_degrades_listing_row_but_fails_single_read() {
    let (dir, store) = open_store();
    let (student_id, course_id) = seed_student_and_course(&store);
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();
    let bad = enrollments.enroll_student(student_id, course_id).unwrap();
    let good = enrollments.enroll_student(student_id, course_id).unwrap();

    let conn = Connection::open(dir.path().join("academicDB.db")).unwrap();
    conn.execute(
        "UPDATE Enrollments SET EnrollmentDate = 'yesterday' WHERE ID = ?1",
        [bad],
    )
    .unwrap();

    let listing = enrollments.list_enrollments().unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, bad);
    assert_eq!(listing[0].enrollment_date, None);
    assert_eq!(listing[0].student_name.as_deref(), Some("Ana Li"));
    assert_eq!(listing[1].id, good);
    assert_eq!(listing[1].enrollment_date, Some(Local::now().date_naive()));

    assert!(matches!(
        enrollments.get_enrollment(bad).unwrap_err(),
        RepoError::InvalidData(_)
    ));
}

#[test]
fn rows_with_null_columns_list_instead_of_failing() {
    let (dir, store) = open_store();
    let (student_id, _course_id) = seed_student_and_course(&store);
    let enrollments = SqliteEnrollmentRepository::try_new(&store).unwrap();

    let conn = Connection::open(dir.path().join("academicDB.db")).unwrap();
    conn.execute(
        "INSERT INTO Enrollments (StudentID) VALUES (?1)",
        [student_id],
    )
    .unwrap();

    let listing = enrollments.list_enrollments().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].student_name.as_deref(), Some("Ana Li"));
    assert_eq!(listing[0].course_id, None);
    assert_eq!(listing[0].course_title, None);
    assert_eq!(listing[0].enrollment_date, None);
    assert_eq!(listing[0].grade, None);

    let single = enrollments.get_enrollment(listing[0].id).unwrap().unwrap();
    assert_eq!(single.enrollment_date, None);
    assert_eq!(single.course_id, None);
}

fn seed_student_and_course(store: &Store) -> (i64, i64) {
    let students = SqliteStudentRepository::try_new(store).unwrap();
    let courses = SqliteCourseRepository::try_new(store).unwrap();
    let student_id = students
        .create_student(&StudentFields::new("Ana Li", 20, "S100", "CS"))
        .unwrap();
    let course_id = courses
        .create_course(&CourseFields::new("Algorithms", 4, None))
        .unwrap();
    (student_id, course_id)
}
