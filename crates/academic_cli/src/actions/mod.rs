//! Menu tables and handlers for the four record types.
//!
//! # Responsibility
//! - Collect field values from the operator, call the repositories, and
//!   print results in the legacy row layout.
//! - Keep numbering identical to the original menus.

use crate::console::Console;
use crate::menu::{ActionError, ActionResult, Menu, MenuEntry, MenuOutcome};
use academic_core::{
    RepoResult, SqliteCourseRepository, SqliteEnrollmentRepository, SqliteStudentRepository,
    SqliteTeacherRepository, Store,
};
use std::fmt::Display;
use std::io;

mod course;
mod enrollment;
mod student;
mod teacher;

const ABSENT: &str = "<none>";

/// Repositories shared by every menu action.
pub struct Repos<'store> {
    pub students: SqliteStudentRepository<'store>,
    pub teachers: SqliteTeacherRepository<'store>,
    pub courses: SqliteCourseRepository<'store>,
    pub enrollments: SqliteEnrollmentRepository<'store>,
}

impl<'store> Repos<'store> {
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        Ok(Self {
            students: SqliteStudentRepository::try_new(store)?,
            teachers: SqliteTeacherRepository::try_new(store)?,
            courses: SqliteCourseRepository::try_new(store)?,
            enrollments: SqliteEnrollmentRepository::try_new(store)?,
        })
    }
}

pub fn main_menu<'store>() -> Menu<Repos<'store>> {
    Menu {
        name: "main",
        title: "=== Academic Management System ===",
        entries: vec![
            MenuEntry {
                label: "Manage Students",
                action: manage_students,
            },
            MenuEntry {
                label: "Manage Teachers",
                action: manage_teachers,
            },
            MenuEntry {
                label: "Manage Courses",
                action: manage_courses,
            },
            MenuEntry {
                label: "Manage Enrollments",
                action: manage_enrollments,
            },
        ],
        back_label: "Exit",
    }
}

fn manage_students(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    run_submenu(student::menu(), repos, console)
}

fn manage_teachers(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    run_submenu(teacher::menu(), repos, console)
}

fn manage_courses(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    run_submenu(course::menu(), repos, console)
}

fn manage_enrollments(repos: &Repos<'_>, console: &mut Console<'_>) -> ActionResult {
    run_submenu(enrollment::menu(), repos, console)
}

fn run_submenu<'store>(
    menu: Menu<Repos<'store>>,
    repos: &Repos<'store>,
    console: &mut Console<'_>,
) -> ActionResult {
    match menu.run(repos, console)? {
        MenuOutcome::Back => Ok(()),
        MenuOutcome::Closed => Err(ActionError::Closed),
    }
}

fn print_rows<T>(
    console: &mut Console<'_>,
    heading: &str,
    rows: &[T],
    render: fn(&T) -> String,
) -> io::Result<()> {
    console.say(heading)?;
    if rows.is_empty() {
        return console.say("No records found.");
    }
    for row in rows {
        console.say(render(row))?;
    }
    Ok(())
}

fn or_absent<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |value| value.to_string())
}
