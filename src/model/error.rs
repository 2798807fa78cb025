//! Errors returned by element and container mutators.
//!
//! Mutators never panic and never log to a document's error log; they return
//! one of these values and leave the object unchanged.

use thiserror::Error;

use crate::core::LevelVersion;
use crate::model::schema::ElementKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// The value failed the syntax or type of the attribute.
    #[error("invalid value '{value}' for attribute '{attribute}': {reason}")]
    InvalidAttributeValue {
        attribute: String,
        value: String,
        reason: String,
    },

    /// The attribute does not exist on this kind at this level/version.
    #[error("attribute '{attribute}' is not allowed on <{element}> at {level_version}")]
    UnexpectedAttribute {
        attribute: String,
        element: &'static str,
        level_version: LevelVersion,
    },

    /// The element kind is not allowed in this place at this level/version.
    #[error("element <{element}> is not allowed in <{parent}> at {level_version}")]
    UnexpectedElement {
        element: &'static str,
        parent: &'static str,
        level_version: LevelVersion,
    },

    #[error("level/version mismatch: container is {expected}, element is {found}")]
    LevelVersionMismatch {
        expected: LevelVersion,
        found: LevelVersion,
    },

    #[error("<{element}> is missing required attributes: {}", .missing.join(", "))]
    MissingRequiredAttributes {
        element: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("an element with id '{0}' already exists in this list")]
    DuplicateId(String),

    #[error("unsupported SED-ML level/version {0}")]
    UnsupportedLevelVersion(LevelVersion),

    /// The defensive post-condition of an `unset` did not hold.
    #[error("operation failed on attribute '{0}'")]
    OperationFailed(String),
}

impl OperationError {
    pub(crate) fn unexpected_attribute(
        attribute: &str,
        kind: ElementKind,
        level_version: LevelVersion,
    ) -> Self {
        OperationError::UnexpectedAttribute {
            attribute: attribute.to_string(),
            element: kind.tag(),
            level_version,
        }
    }

    pub(crate) fn invalid_value(
        attribute: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OperationError::InvalidAttributeValue {
            attribute: attribute.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
