//! Line-oriented operator I/O and text-to-type coercion.
//!
//! # Invariants
//! - Coercion failures surface as `InputFormatError` before any repository
//!   call is made.
//! - End of input surfaces as `PromptError::Closed`.

use academic_core::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Raw operator text that could not be coerced to the expected type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormatError {
    pub field: &'static str,
    pub raw: String,
}

impl Display for InputFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must be a whole number, got `{}`", self.field, self.raw)
    }
}

impl Error for InputFormatError {}

#[derive(Debug)]
pub enum PromptError {
    InputFormat(InputFormatError),
    /// Input reached end of file.
    Closed,
    Io(io::Error),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFormat(err) => write!(f, "{err}"),
            Self::Closed => f.write_str("input closed"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InputFormat(err) => Some(err),
            Self::Closed => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<InputFormatError> for PromptError {
    fn from(value: InputFormatError) -> Self {
        Self::InputFormat(value)
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Operator terminal: one input stream, one output stream.
pub struct Console<'io> {
    input: &'io mut dyn BufRead,
    output: &'io mut dyn Write,
}

impl<'io> Console<'io> {
    pub fn new(input: &'io mut dyn BufRead, output: &'io mut dyn Write) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints `label` and reads one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Reads free text; end of input is an error.
    pub fn prompt_text(&mut self, label: &str) -> Result<String, PromptError> {
        self.read_line(label)?.ok_or(PromptError::Closed)
    }

    pub fn prompt_i64(&mut self, label: &str, field: &'static str) -> Result<i64, PromptError> {
        let raw = self.prompt_text(label)?;
        Ok(parse_i64(field, &raw)?)
    }

    /// Reads an optional reference; blank or `0` means "none".
    pub fn prompt_optional_id(
        &mut self,
        label: &str,
        field: &'static str,
    ) -> Result<Option<RecordId>, PromptError> {
        let raw = self.prompt_text(label)?;
        Ok(parse_optional_id(field, &raw)?)
    }
}

pub fn parse_i64(field: &'static str, raw: &str) -> Result<i64, InputFormatError> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| InputFormatError {
        field,
        raw: trimmed.to_string(),
    })
}

/// Legacy stores used `0` for "unassigned"; it never names a real row.
pub fn parse_optional_id(
    field: &'static str,
    raw: &str,
) -> Result<Option<RecordId>, InputFormatError> {
    match raw.trim() {
        "" | "0" => Ok(None),
        other => parse_i64(field, other).map(Some),
    }
}

/// Empty answers become `None`.
pub fn optional_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
