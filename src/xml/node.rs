//! Generic XML islands.
//!
//! Notes, annotations, MathML and `newXML` payloads are not part of the SED-ML
//! object model proper; they are kept as small owned XML trees and written
//! back verbatim.

use std::fmt;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;

use crate::xml::deserialize::DeserializeError;
use crate::xml::quick::de::{Attrs, read_island};
use crate::xml::quick::ser::XmlEmitter;
use crate::xml::serialize::SerializeError;

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

/// An owned XML element with qualified names kept as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// The name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    /// Parse the first element of `xml`.
    pub fn from_xml_str(xml: &str) -> Result<Self, DeserializeError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let e = e.into_owned();
                    let attrs = Attrs::from_start(&e, &reader)?;
                    return read_island(&mut reader, &mut buf, attrs, false);
                }
                Event::Empty(e) => {
                    let e = e.into_owned();
                    let attrs = Attrs::from_start(&e, &reader)?;
                    return read_island(&mut reader, &mut buf, attrs, true);
                }
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                Event::Text(e) if !e.iter().all(u8::is_ascii_whitespace) => {
                    return Err(DeserializeError::Custom(
                        "text outside of an element".to_string(),
                    ));
                }
                _ => {}
            }
        }
    }

    /// Serialize without indentation.
    pub fn to_xml_string(&self) -> Result<String, SerializeError> {
        let mut writer = Writer::new(Vec::new());
        XmlEmitter::new(&mut writer).island(self)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for child in &element.children {
        match child {
            XmlNode::Text(t) => out.push_str(t),
            XmlNode::Element(e) => collect_text(e, out),
        }
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_xml_string() {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}
