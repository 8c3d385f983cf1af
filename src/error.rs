//! Error types for linewise

use crate::convert::ScalarKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The reason a read failed, before it is attached to a position in the input
#[derive(Debug, Error)]
pub enum ReadError {
    /// A line was requested after the last line of input
    #[error("No more lines to read, the input ended after {lines_read} line(s)")]
    ExhaustedInput { lines_read: usize },

    /// A line did not hold exactly one token per expected field
    #[error("The number of values ({actual}) doesn't match the expected fields: {expected:?}")]
    ArityMismatch { expected: Vec<String>, actual: usize },

    /// The parent type has no registered field with that name
    #[error("The field '{field}' was not found in type {type_name}")]
    UnknownField { type_name: String, field: String },

    /// A token is not a literal of the requested scalar type
    #[error("{}", conversion_message(.value, .kind, .field.as_deref()))]
    TypeConversion {
        value: String,
        kind: ScalarKind,
        field: Option<String>,
    },

    /// A variable was read before any reader set it
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    /// A size function evaluated to a negative item count
    #[error("Invalid container size: {value}")]
    NegativeSize { value: i64 },

    /// A parent-derived value was requested while reading a root value
    #[error("No parent object is available in this context")]
    MissingParent,

    /// The configured separator is not a valid regular expression
    #[error("Invalid separator: {0}")]
    InvalidSeparator(#[from] regex::Error),

    /// A reader was configured with an empty field or variable name
    #[error("Empty {0} name is not allowed, should be None to omit the {0}")]
    EmptyName(&'static str),

    /// Generic error raised by user-supplied construction code
    #[error("{0}")]
    Custom(String),
}

fn conversion_message(value: &str, kind: &ScalarKind, field: Option<&str>) -> String {
    match field {
        Some(field) => format!(
            "Type mismatch, cannot assign value '{}' to field '{}' of type {}",
            value, field, kind
        ),
        None => format!("Cannot convert '{}' to {}", value, kind),
    }
}

impl ReadError {
    /// Attach this error to the line being processed when it occurred
    pub fn at_line(self, line_number: usize, line: impl Into<String>) -> ParseError {
        ParseError::new(line_number, Some(line.into()), self)
    }

    /// Attach this error to a position between lines
    pub fn at(self, line_number: usize) -> ParseError {
        ParseError::new(line_number, None, self)
    }
}

impl From<String> for ReadError {
    fn from(s: String) -> Self {
        ReadError::Custom(s)
    }
}

impl From<&str> for ReadError {
    fn from(s: &str) -> Self {
        ReadError::Custom(s.to_string())
    }
}

/// A failure while parsing the input, located at a line
#[derive(Debug, Error)]
#[error("Parse error at line {line_number}: {message}")]
pub struct ParseError {
    /// 1-based number of the line being read when the error occurred
    pub line_number: usize,
    /// Raw text of that line, if it had been consumed
    pub line: Option<String>,
    /// Human readable description of the failure
    pub message: String,
    /// Underlying cause
    #[source]
    pub cause: ReadError,
}

impl ParseError {
    /// Create a parse error from its cause
    pub fn new(line_number: usize, line: Option<String>, cause: ReadError) -> Self {
        Self {
            line_number,
            line,
            message: cause.to_string(),
            cause,
        }
    }

    /// Get the underlying cause
    pub fn cause(&self) -> &ReadError {
        &self.cause
    }
}

/// Failure of a file-based parse
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be read
    #[error("Could not read input file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input stream could not be read
    #[error("Could not read input: {0}")]
    Read(#[from] io::Error),

    /// The input was read but could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ParseError>;
