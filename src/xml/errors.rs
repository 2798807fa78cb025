//! The document error log.
//!
//! Reading never aborts on recoverable problems: every issue found while
//! parsing or checking a document is appended here with a severity, and
//! callers decide whether the document is usable.

use std::fmt;
use std::path::PathBuf;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// The document could not be read past this point.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    Io,
    NotWellFormed,
    UnknownElement,
    UnknownAttribute,
    InvalidAttributeValue,
    /// An attribute that exists in the schema but not at the document's level/version.
    AttributeNotAllowed,
    /// An element that exists in the schema but not at the document's level/version.
    ElementNotAllowed,
    MissingRequiredAttribute,
    MissingRequiredElement,
    UnsupportedLevelVersion,
    NamespaceMismatch,
    DuplicateId,
    DanglingReference,
}

/// Context information for error reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// The file path where the error occurred (if available).
    pub file_path: Option<PathBuf>,
    /// The line number where the error occurred (if available).
    pub line: Option<usize>,
    /// The column number where the error occurred (if available).
    pub column: Option<usize>,
    /// Additional context about what was being parsed.
    pub parsing: Option<String>,
}

impl ErrorContext {
    /// Create a new empty error context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error context with file path.
    pub fn with_file_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Create an error context with line and column.
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            ..Self::default()
        }
    }

    /// Add parsing context information.
    pub fn with_parsing<S: Into<String>>(mut self, parsing: S) -> Self {
        self.parsing = Some(parsing.into());
        self
    }

    pub fn with_file<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.file_path = path.map(Into::into);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(ref path) = self.file_path {
            parts.push(format!(" in file '{}'", path.display()));
        }

        if let Some(line) = self.line {
            if let Some(column) = self.column {
                parts.push(format!(" at line {}, column {}", line, column));
            } else {
                parts.push(format!(" at line {}", line));
            }
        }

        if let Some(ref parsing) = self.parsing {
            parts.push(format!(" while parsing {}", parsing));
        }

        if parts.is_empty() {
            return Ok(());
        }

        write!(f, "{}", parts.join(","))
    }
}

/// One entry in an [`ErrorLog`].
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{severity}: {message}{context}")]
pub struct SedError {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub context: ErrorContext,
}

impl SedError {
    pub fn new(code: ErrorCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }
}

/// Append-only sequence of errors, cleared on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLog {
    errors: Vec<SedError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: SedError) {
        log::debug!("{}", error);
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of entries with exactly this severity.
    pub fn num_errors(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    /// Whether any entry is an error or worse.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity >= Severity::Error)
    }

    pub fn errors(&self) -> &[SedError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &SedError> {
        self.errors.iter()
    }

    pub fn with_code(&self, code: ErrorCode) -> impl Iterator<Item = &SedError> {
        self.errors.iter().filter(move |e| e.code == code)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.errors
                .iter()
                .enumerate()
                .map(|(idx, error)| format!("  {}. {}", idx + 1, error))
                .join("\n")
        )
    }
}
