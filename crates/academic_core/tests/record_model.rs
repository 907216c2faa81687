use academic_core::{
    CourseFields, EnrollmentListing, RecordKind, RecordValidationError, Student, StudentFields,
    TeacherFields,
};
use chrono::NaiveDate;

#[test]
fn field_validation_rejects_blank_names_and_titles() {
    assert!(StudentFields::new("Ana Li", 20, "S100", "CS")
        .validate()
        .is_ok());
    assert_eq!(
        TeacherFields::new(" ", "Math", "a@uni.edu")
            .validate()
            .unwrap_err(),
        RecordValidationError::EmptyField {
            kind: RecordKind::Teacher,
            field: "name"
        }
    );
    assert_eq!(
        CourseFields::new("\t", 3, None)
            .validate()
            .unwrap_err()
            .to_string(),
        "course title cannot be empty"
    );
}

#[test]
fn student_serialization_uses_snake_case_fields() {
    let student = Student {
        id: 1,
        name: "Ana Li".to_string(),
        age: Some(20),
        student_code: Some("S100".to_string()),
        major: None,
    };

    let json = serde_json::to_value(&student).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["student_code"], "S100");
    assert!(json["major"].is_null());

    let decoded: Student = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, student);
}

#[test]
fn enrollment_listing_serializes_dates_and_absent_names() {
    let listing = EnrollmentListing {
        id: 3,
        student_id: Some(1),
        course_id: Some(9),
        student_name: Some("Ana Li".to_string()),
        course_title: None,
        enrollment_date: NaiveDate::from_ymd_opt(2026, 10, 15),
        grade: None,
    };

    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["enrollment_date"], "2026-10-15");
    assert!(json["course_title"].is_null());
    assert!(json["grade"].is_null());
}
