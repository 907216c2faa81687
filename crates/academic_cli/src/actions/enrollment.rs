use super::{or_absent, print_rows, Repos};
use crate::console::{optional_text, Console};
use crate::menu::{ActionResult, Menu, MenuEntry};
use academic_core::{EnrollmentListing, EnrollmentRepository};

pub(super) fn menu<'store>() -> Menu<Repos<'store>> {
    Menu {
        name: "enrollments",
        title: "=== Enrollment Management ===",
        entries: vec![
            MenuEntry {
                label: "Enroll Student in a Course",
                action: enroll,
            },
            MenuEntry {
                label: "Update Enrollment (Grade)",
                action: update_grade,
            },
            MenuEntry {
                label: "Delete Enrollment",
                action: delete,
            },
            MenuEntry {
                label: "View All Enrollments",
                action: view_all,
            },
        ],
        back_label: "Back to Main Menu",
    }
}

fn enroll(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let student_id = console.prompt_i64("Enter Student ID: ", "student id")?;
    let course_id = console.prompt_i64("Enter Course ID: ", "course id")?;
    let id = repos.enrollments.enroll_student(student_id, course_id)?;
    console.say(format_args!("Enrollment successful! (ID: {id})"))?;
    Ok(())
}

fn update_grade(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter Enrollment ID to update grade: ", "enrollment id")?;
    let grade = console.prompt_text("Enter new Grade (e.g., A, B, etc.; blank clears): ")?;
    repos
        .enrollments
        .update_enrollment_grade(id, optional_text(&grade))?;
    console.say("Enrollment updated successfully!")?;
    Ok(())
}

fn delete(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter Enrollment ID to delete: ", "enrollment id")?;
    repos.enrollments.delete_enrollment(id)?;
    console.say("Enrollment deleted successfully!")?;
    Ok(())
}

fn view_all(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let enrollments = repos.enrollments.list_enrollments()?;
    print_rows(console, "=== All Enrollments ===", &enrollments, render)?;
    Ok(())
}

fn render(enrollment: &EnrollmentListing) -> String {
    format!(
        "Enrollment ID: {} | Student: {} | Course: {} | Date: {} | Grade: {}",
        enrollment.id,
        or_absent(enrollment.student_name.as_deref()),
        or_absent(enrollment.course_title.as_deref()),
        or_absent(enrollment.enrollment_date),
        or_absent(enrollment.grade.as_deref())
    )
}
