//! XML deserialization module.
//!
//! Reads SED-ML text into a [`SedDocument`] with quick-xml. Reading never
//! fails: every problem is recorded in the document's error log with its
//! line and column, and as much of the tree as could be understood is kept.

mod reader;

use std::path::Path;

use thiserror::Error;

use crate::model::SedDocument;
use crate::xml::errors::{ErrorCode, ErrorContext, SedError, Severity};

use reader::SedReader;

/// Errors raised by the low-level XML plumbing.
///
/// These never escape [`read_sedml`]; they are turned into `Fatal` log entries.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Deserialization error: {0}")]
    Custom(String),
    #[error("Unexpected end of XML")]
    UnexpectedEof,
}

/// Read a SED-ML file.
///
/// A missing or unreadable file yields an empty document whose log holds a
/// single `Fatal` entry.
pub fn read_sedml<P: AsRef<Path>>(path: P) -> SedDocument {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => SedReader::new(&text, Some(path.to_path_buf())).read(),
        Err(e) => {
            let mut doc = SedDocument::new();
            doc.error_log_mut().push(
                SedError::new(
                    ErrorCode::Io,
                    Severity::Fatal,
                    format!("cannot read file: {}", e),
                )
                .with_context(ErrorContext::with_file_path(path)),
            );
            doc
        }
    }
}

/// Read SED-ML from a string.
pub fn read_sedml_from_string(text: &str) -> SedDocument {
    SedReader::new(text, None).read()
}
