//! MathML content carried by data generators, compute changes, functional
//! ranges and set values.
//!
//! The expression is never evaluated. It is kept as the list of content
//! elements found under `<math>`, together with any extra attributes on the
//! `<math>` element itself, and always written back in the MathML namespace.

#[cfg(feature = "formula")]
pub mod formula;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::xml::deserialize::DeserializeError;
use crate::xml::node::{XmlElement, XmlNode};
use crate::xml::serialize::SerializeError;

pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

#[derive(Debug, Error)]
pub enum MathError {
    #[error("failed to read MathML: {0}")]
    Xml(#[from] DeserializeError),

    #[error("expected a <math> element, found <{0}>")]
    NotMath(String),
}

/// An opaque MathML expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Math {
    attributes: Vec<(String, String)>,
    content: Vec<XmlElement>,
}

impl Math {
    /// Wrap a single content element such as `<apply>` or `<ci>`.
    pub fn new(content: XmlElement) -> Self {
        Self {
            attributes: Vec::new(),
            content: vec![content],
        }
    }

    pub fn from_content(content: Vec<XmlElement>) -> Self {
        Self {
            attributes: Vec::new(),
            content,
        }
    }

    /// Build from a parsed `<math>` element. The default namespace
    /// declaration is dropped; other attributes are kept.
    pub fn from_element(element: XmlElement) -> Result<Self, MathError> {
        if element.local_name() != "math" {
            return Err(MathError::NotMath(element.name));
        }
        let attributes = element
            .attributes
            .into_iter()
            .filter(|(key, _)| key != "xmlns")
            .collect();
        let content = element
            .children
            .into_iter()
            .filter_map(|node| match node {
                XmlNode::Element(e) => Some(e),
                XmlNode::Text(_) => None,
            })
            .collect();
        Ok(Self {
            attributes,
            content,
        })
    }

    pub fn from_xml_str(xml: &str) -> Result<Self, MathError> {
        Self::from_element(XmlElement::from_xml_str(xml)?)
    }

    /// Build from an infix formula such as `v1 / max(v2, 1e-3)`.
    #[cfg(feature = "formula")]
    pub fn from_formula(text: &str) -> Result<Self, formula::FormulaError> {
        formula::parse_formula(text)
    }

    pub fn content(&self) -> &[XmlElement] {
        &self.content
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Names referenced through `<ci>` anywhere in the expression.
    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for element in &self.content {
            collect_identifiers(element, &mut names);
        }
        names
    }

    /// The `<math>` element as it is written.
    pub fn to_element(&self) -> XmlElement {
        let mut element = XmlElement::new("math").with_attribute("xmlns", MATHML_NAMESPACE);
        element.attributes.extend(self.attributes.iter().cloned());
        element.children = self
            .content
            .iter()
            .cloned()
            .map(XmlNode::Element)
            .collect();
        element
    }

    pub fn to_xml_string(&self) -> Result<String, SerializeError> {
        self.to_element().to_xml_string()
    }
}

fn collect_identifiers(element: &XmlElement, names: &mut BTreeSet<String>) {
    if element.local_name() == "ci" {
        let name = element.text_content();
        let name = name.trim();
        if !name.is_empty() {
            names.insert(name.to_string());
        }
        return;
    }
    for child in element.elements() {
        collect_identifiers(child, names);
    }
}
