use super::{or_absent, print_rows, Repos};
use crate::console::{Console, PromptError};
use crate::menu::{ActionResult, Menu, MenuEntry};
use academic_core::{Teacher, TeacherFields, TeacherRepository};

pub(super) fn menu<'store>() -> Menu<Repos<'store>> {
    Menu {
        name: "teachers",
        title: "=== Teacher Management ===",
        entries: vec![
            MenuEntry {
                label: "Add Teacher",
                action: add,
            },
            MenuEntry {
                label: "Update Teacher",
                action: update,
            },
            MenuEntry {
                label: "Delete Teacher",
                action: delete,
            },
            MenuEntry {
                label: "View All Teachers",
                action: view_all,
            },
            MenuEntry {
                label: "Search Teacher by Name",
                action: search,
            },
        ],
        back_label: "Back to Main Menu",
    }
}

fn add(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    console.say("Enter Teacher Details:")?;
    let fields = prompt_fields(console, "")?;
    let id = repos.teachers.create_teacher(&fields)?;
    console.say(format_args!("Teacher added successfully! (ID: {id})"))?;
    Ok(())
}

fn update(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter the ID of the teacher to update: ", "teacher id")?;
    let fields = prompt_fields(console, "New ")?;
    repos.teachers.update_teacher(id, &fields)?;
    console.say("Teacher updated successfully!")?;
    Ok(())
}

fn delete(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter the ID of the teacher to delete: ", "teacher id")?;
    repos.teachers.delete_teacher(id)?;
    console.say("Teacher deleted successfully!")?;
    Ok(())
}

fn view_all(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let teachers = repos.teachers.list_teachers()?;
    print_rows(console, "=== All Teachers ===", &teachers, render)?;
    Ok(())
}

fn search(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let name = console.prompt_text("Enter name to search: ")?;
    let teachers = repos.teachers.search_teachers(name.trim())?;
    print_rows(console, "=== Search Results ===", &teachers, render)?;
    Ok(())
}

fn prompt_fields(console: &mut Console<'_>, prefix: &str) -> Result<TeacherFields, PromptError> {
    let name = console.prompt_text(&format!("{prefix}Name: "))?;
    let department = console.prompt_text(&format!("{prefix}Department: "))?;
    let email = console.prompt_text(&format!("{prefix}Email (unique): "))?;
    Ok(TeacherFields::new(name, department, email))
}

fn render(teacher: &Teacher) -> String {
    format!(
        "ID: {} | Name: {} | Department: {} | Email: {}",
        teacher.id,
        teacher.name,
        or_absent(teacher.department.as_deref()),
        or_absent(teacher.email.as_deref())
    )
}
