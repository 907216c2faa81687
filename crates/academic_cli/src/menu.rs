//! Generic numbered-menu driver.
//!
//! One driver runs the main menu and every entity submenu. A menu is a title,
//! an ordered table of `(label, action)` entries numbered from 1, and a final
//! "back" entry numbered after them.
//!
//! # Invariants
//! - A failed action is reported and the loop resumes.
//! - Only the back entry, end of input, or an output I/O failure end a loop.

use crate::console::{Console, InputFormatError, PromptError};
use academic_core::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub type ActionResult = Result<(), ActionError>;

/// Handler invoked for one menu entry.
pub type Action<Ctx> = fn(&Ctx, &mut Console<'_>) -> ActionResult;

/// Failure of a single menu action.
#[derive(Debug)]
pub enum ActionError {
    InputFormat(InputFormatError),
    Repo(RepoError),
    /// Input ended mid-action.
    Closed,
    Io(io::Error),
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFormat(err) => write!(f, "invalid input: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Closed => f.write_str("input closed"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InputFormat(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Closed => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<PromptError> for ActionError {
    fn from(value: PromptError) -> Self {
        match value {
            PromptError::InputFormat(err) => Self::InputFormat(err),
            PromptError::Closed => Self::Closed,
            PromptError::Io(err) => Self::Io(err),
        }
    }
}

impl From<RepoError> for ActionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<io::Error> for ActionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub struct MenuEntry<Ctx> {
    pub label: &'static str,
    pub action: Action<Ctx>,
}

/// How a menu loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Back,
    Closed,
}

pub struct Menu<Ctx> {
    /// Short name used in log events.
    pub name: &'static str,
    pub title: &'static str,
    pub entries: Vec<MenuEntry<Ctx>>,
    pub back_label: &'static str,
}

enum Selection<'m, Ctx> {
    Entry(&'m MenuEntry<Ctx>),
    Back,
    Invalid,
}

impl<Ctx> Menu<Ctx> {
    /// Runs the loop until the back entry is chosen or input ends.
    pub fn run(&self, ctx: &Ctx, console: &mut Console<'_>) -> io::Result<MenuOutcome> {
        loop {
            self.render(console)?;
            let Some(choice) = console.read_line("Select an option: ")? else {
                return Ok(MenuOutcome::Closed);
            };

            let entry = match self.select(&choice) {
                Selection::Entry(entry) => entry,
                Selection::Back => return Ok(MenuOutcome::Back),
                Selection::Invalid => {
                    console.say("Invalid option! Please try again.")?;
                    continue;
                }
            };

            match (entry.action)(ctx, console) {
                Ok(()) => {
                    info!(
                        "event=menu_action module=cli menu={} action=\"{}\" status=ok",
                        self.name, entry.label
                    );
                }
                Err(ActionError::Closed) => return Ok(MenuOutcome::Closed),
                Err(ActionError::Io(err)) => return Err(err),
                Err(err) => {
                    warn!(
                        "event=menu_action module=cli menu={} action=\"{}\" status=error error={}",
                        self.name, entry.label, err
                    );
                    console.say(format_args!("Error: {err}"))?;
                }
            }
        }
    }

    fn render(&self, console: &mut Console<'_>) -> io::Result<()> {
        console.say("")?;
        console.say(self.title)?;
        for (index, entry) in self.entries.iter().enumerate() {
            console.say(format_args!("{}. {}", index + 1, entry.label))?;
        }
        console.say(format_args!(
            "{}. {}",
            self.entries.len() + 1,
            self.back_label
        ))
    }

    fn select(&self, choice: &str) -> Selection<'_, Ctx> {
        let Ok(number) = choice.trim().parse::<usize>() else {
            return Selection::Invalid;
        };
        if number == self.entries.len() + 1 {
            return Selection::Back;
        }
        match number.checked_sub(1).and_then(|index| self.entries.get(index)) {
            Some(entry) => Selection::Entry(entry),
            None => Selection::Invalid,
        }
    }
}
