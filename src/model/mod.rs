//! The SED-ML object model.
//!
//! Every element kind shares one generic representation, [`SedElement`],
//! whose legal attributes, lists and children come from the tables in
//! [`schema`]. [`SedDocument`] owns the tree and its level/version.

pub mod accessors;
pub mod attribute;
pub mod document;
pub mod element;
pub mod error;
pub mod list;
pub mod schema;
pub mod validation;

pub use attribute::{AttrValue, AttributeTable};
pub use document::SedDocument;
pub use element::SedElement;
pub use error::OperationError;
pub use list::ListOf;
pub use schema::{AttrSpec, AttrType, ChildKind, ElementKind, ListKind, Requirement};
pub use validation::consistency_errors;
