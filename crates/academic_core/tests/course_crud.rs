use academic_core::{
    ensure_schema, ConstraintViolation, CourseFields, CourseRepository, RecordKind, RepoError,
    SqliteCourseRepository, SqliteTeacherRepository, Store, TeacherFields, TeacherRepository,
};
use rusqlite::Connection;
use tempfile::TempDir;

fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = ensure_schema(dir.path().join("academicDB.db")).unwrap();
    (dir, store)
}

#[test]
fn unassigned_course_roundtrips_with_absent_teacher() {
    let (_dir, store) = open_store();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let fields = CourseFields::new("Algorithms", 4, None);
    let id = courses.create_course(&fields).unwrap();
    assert_eq!(id, 1);
    assert_eq!(courses.get_course(id).unwrap().unwrap().fields(), fields);

    let listing = courses.list_courses().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].teacher_id, None);
    assert_eq!(listing[0].teacher_name, None);
}

#[test]
fn listing_resolves_teacher_name() {
    let (_dir, store) = open_store();
    let teachers = SqliteTeacherRepository::try_new(&store).unwrap();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let teacher_id = teachers
        .create_teacher(&TeacherFields::new("Ada Lovelace", "Math", "ada@uni.edu"))
        .unwrap();
    courses
        .create_course(&CourseFields::new("Analysis", 3, Some(teacher_id)))
        .unwrap();

    let listing = courses.list_courses().unwrap();
    assert_eq!(listing[0].teacher_id, Some(teacher_id));
    assert_eq!(listing[0].teacher_name.as_deref(), Some("Ada Lovelace"));
}

#[test]
fn missing_teacher_reference_is_rejected_on_create_and_update() {
    let (_dir, store) = open_store();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let err = courses
        .create_course(&CourseFields::new("Ghost Course", 2, Some(77)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation(ConstraintViolation::MissingReference {
            kind: RecordKind::Teacher,
            id: 77
        })
    ));
    assert!(courses.list_courses().unwrap().is_empty());

    let id = courses
        .create_course(&CourseFields::new("Algorithms", 4, None))
        .unwrap();
    let err = courses
        .update_course(id, &CourseFields::new("Algorithms", 4, Some(77)))
        .unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
    assert_eq!(courses.get_course(id).unwrap().unwrap().teacher_id, None);
}

#[test]
fn update_replaces_fields_and_can_unassign_teacher() {
    let (_dir, store) = open_store();
    let teachers = SqliteTeacherRepository::try_new(&store).unwrap();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let teacher_id = teachers
        .create_teacher(&TeacherFields::new("Ada", "Math", "ada@uni.edu"))
        .unwrap();
    let id = courses
        .create_course(&CourseFields::new("Analysis", 3, Some(teacher_id)))
        .unwrap();

    let replacement = CourseFields::new("Real Analysis", 5, None);
    courses.update_course(id, &replacement).unwrap();
    assert_eq!(courses.get_course(id).unwrap().unwrap().fields(), replacement);
}

#[test]
fn update_and_delete_missing_id_return_not_found() {
    let (_dir, store) = open_store();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let err = courses
        .update_course(3, &CourseFields::new("Nothing", 1, None))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Course,
            id: 3
        }
    ));
    assert!(matches!(
        courses.delete_course(3).unwrap_err(),
        RepoError::NotFound { id: 3, .. }
    ));
}

#[test]
fn deleting_teacher_keeps_course_with_absent_teacher_name() {
    let (_dir, store) = open_store();
    let teachers = SqliteTeacherRepository::try_new(&store).unwrap();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let teacher_id = teachers
        .create_teacher(&TeacherFields::new("Ada", "Math", "ada@uni.edu"))
        .unwrap();
    let course_id = courses
        .create_course(&CourseFields::new("Analysis", 3, Some(teacher_id)))
        .unwrap();

    teachers.delete_teacher(teacher_id).unwrap();

    let listing = courses.list_courses().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, course_id);
    assert_eq!(listing[0].teacher_id, Some(teacher_id));
    assert_eq!(listing[0].teacher_name, None);
}

#[test]
fn search_matches_title_case_insensitively() {
    let (_dir, store) = open_store();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();
    courses
        .create_course(&CourseFields::new("Algorithms", 4, None))
        .unwrap();
    courses
        .create_course(&CourseFields::new("Linear Algebra", 3, None))
        .unwrap();
    courses
        .create_course(&CourseFields::new("Poetry", 2, None))
        .unwrap();

    let titles: Vec<_> = courses
        .search_courses("ALG")
        .unwrap()
        .into_iter()
        .map(|course| course.title)
        .collect();
    assert_eq!(titles, vec!["Algorithms", "Linear Algebra"]);
    assert_eq!(courses.search_courses("").unwrap().len(), 3);
    assert!(courses.search_courses("chemistry").unwrap().is_empty());
}

#[test]
fn empty_title_is_rejected() {
    let (_dir, store) = open_store();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let err = courses
        .create_course(&CourseFields::new("", 4, None))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn legacy_course_with_null_credits_is_listed() {
    let (dir, store) = open_store();
    let courses = SqliteCourseRepository::try_new(&store).unwrap();

    let conn = Connection::open(dir.path().join("academicDB.db")).unwrap();
    conn.execute("INSERT INTO Courses (Title) VALUES ('Légende')", [])
        .unwrap();

    let listing = courses.list_courses().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].credits, None);
    assert_eq!(listing[0].teacher_name, None);
    assert_eq!(courses.search_courses("LÉG").unwrap().len(), 1);
}
