//! Quick-xml helper utilities for SED-ML (de)serialization.
//!
//! This module provides ergonomic wrappers around quick-xml's low-level APIs
//! to reduce boilerplate in the reader and writer.

pub mod de;
pub mod ser;

pub use de::{Attrs, line_column, read_island, read_text, skip_element};
pub use ser::{AttrList, XmlEmitter};
