//! Read, build, check and write SED-ML (Simulation Experiment Description
//! Markup Language) documents, Level 1 Versions 1 to 4.
//!
//! ```no_run
//! use sedml::{ElementKind, read_sedml, write_sedml_to_string};
//!
//! let mut doc = read_sedml("experiment.sedml");
//! for error in doc.error_log().iter() {
//!     eprintln!("{}", error);
//! }
//! let task = doc.create(ElementKind::Task).unwrap();
//! task.set_id("t2").unwrap();
//! println!("{}", write_sedml_to_string(&doc).unwrap());
//! ```

pub mod core;
pub mod math;
pub mod model;
pub mod xml;

#[cfg(test)]
mod test_utils;

pub use crate::core::{KisaoTerms, LevelVersion};
pub use crate::math::Math;
pub use crate::model::{
    AttrValue, ChildKind, ElementKind, ListKind, ListOf, OperationError, SedDocument, SedElement,
};
pub use crate::xml::{
    ErrorCode, ErrorLog, SedError, Severity, WriteOptions, XmlElement, XmlNode, read_sedml,
    read_sedml_from_string, write_sedml, write_sedml_to_string, write_sedml_with_options,
};
