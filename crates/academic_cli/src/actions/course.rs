use super::{or_absent, print_rows, Repos};
use crate::console::{Console, PromptError};
use crate::menu::{ActionResult, Menu, MenuEntry};
use academic_core::{CourseFields, CourseListing, CourseRepository};

pub(super) fn menu<'store>() -> Menu<Repos<'store>> {
    Menu {
        name: "courses",
        title: "=== Course Management ===",
        entries: vec![
            MenuEntry {
                label: "Add Course",
                action: add,
            },
            MenuEntry {
                label: "Update Course",
                action: update,
            },
            MenuEntry {
                label: "Delete Course",
                action: delete,
            },
            MenuEntry {
                label: "View All Courses",
                action: view_all,
            },
            MenuEntry {
                label: "Search Course by Title",
                action: search,
            },
        ],
        back_label: "Back to Main Menu",
    }
}

fn add(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    console.say("Enter Course Details:")?;
    let fields = prompt_fields(console, "")?;
    let id = repos.courses.create_course(&fields)?;
    console.say(format_args!("Course added successfully! (ID: {id})"))?;
    Ok(())
}

fn update(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter the ID of the course to update: ", "course id")?;
    let fields = prompt_fields(console, "New ")?;
    repos.courses.update_course(id, &fields)?;
    console.say("Course updated successfully!")?;
    Ok(())
}

fn delete(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let id = console.prompt_i64("Enter the ID of the course to delete: ", "course id")?;
    repos.courses.delete_course(id)?;
    console.say("Course deleted successfully!")?;
    Ok(())
}

fn view_all(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let courses = repos.courses.list_courses()?;
    print_rows(console, "=== All Courses ===", &courses, render)?;
    Ok(())
}

fn search(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    let title = console.prompt_text("Enter course title to search: ")?;
    let courses = repos.courses.search_courses(title.trim())?;
    print_rows(console, "=== Search Results ===", &courses, render)?;
    Ok(())
}

fn prompt_fields(console: &mut Console<'_>, prefix: &str) -> Result<CourseFields, PromptError> {
    let title = console.prompt_text(&format!("{prefix}Title: "))?;
    let credits = console.prompt_i64(&format!("{prefix}Credits: "), "credits")?;
    let teacher_id = console.prompt_optional_id(
        &format!("{prefix}Teacher ID (blank if unassigned): "),
        "teacher id",
    )?;
    Ok(CourseFields::new(title, credits, teacher_id))
}

fn render(course: &CourseListing) -> String {
    format!(
        "ID: {} | Title: {} | Credits: {} | Teacher: {}",
        course.id,
        course.title,
        or_absent(course.credits),
        or_absent(course.teacher_name.as_deref())
    )
}
