use super::{or_absent, print_rows, Repos};
use crate::console::{Console, PromptError};
use crate::menu::{ActionResult, Menu, MenuEntry};
use academic_core::{Student, StudentFields, StudentRepository};

pub(super) fn menu<'store>() -> Menu<Repos<'store>> {
    Menu {
        name: "students",
        title: "=== Student Management ===",
        entries: vec![
            MenuEntry {
                label: "Add Student",
                action: add,
            },
            MenuEntry {
                label: "Update Student",
                action: update,
            },
            MenuEntry {
                label: "Delete Student",
                action: delete,
            },
            MenuEntry {
                label: "View All Students",
                action: view_all,
            },
            MenuEntry {
                label: "Search Student by Name",
                action: search,
            },
        ],
        back_label: "Back to Main Menu",
    }
}

fn add(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    console.say("Enter Student Details:")?;
    let fields = prompt_fields(console, "")?;
    let id = repos.students.create_student(&fields)?;
    console.say(format_args!("Student added successfully! (ID: {id})"))?;
    Ok(())
}

fn update(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter the ID of the student to update: ", "student id")?;
    let fields = prompt_fields(console, "New ")?;
    repos.students.update_student(id, &fields)?;
    console.say("Student updated successfully!")?;
    Ok(())
}

fn delete(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter the ID of the student to delete: ", "student id")?;
    repos.students.delete_student(id)?;
    console.say("Student deleted successfully!")?;
    Ok(())
}

fn view_all(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let students = repos.students.list_students()?;
    print_rows(console, "=== All Students ===", &students, render)?;
    Ok(())
}

fn search(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let name = console.prompt_text("Enter name to search: ")?;
    let students = repos.students.search_students(name.trim())?;
    print_rows(console, "=== Search Results ===", &students, render)?;
    Ok(())
}

fn prompt_fields(console: &mut Console<'_>, prefix: &str) -> Result<StudentFields, PromptError> {
    let name = console.prompt_text(&format!("{prefix}Name: "))?;
    let age = console.prompt_i64(&format!("{prefix}Age: "), "age")?;
    let student_code = console.prompt_text(&format!("{prefix}Student ID (unique): "))?;
    let major = console.prompt_text(&format!("{prefix}Major: "))?;
    Ok(StudentFields::new(name, age, student_code, major))
}

fn render(student: &Student) -> String {
    format!(
        "ID: {} | Name: {} | Age: {} | StudentID: {} | Major: {}",
        student.id,
        student.name,
        or_absent(student.age),
        or_absent(student.student_code.as_deref()),
        or_absent(student.major.as_deref())
    )
}
