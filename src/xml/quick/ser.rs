//! Serialization helpers for quick-xml.
//!
//! Provides:
//! - `AttrList`: attribute builder that owns formatted values
//! - `XmlEmitter`: element, text and island writing helpers

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::model::attribute::format_double;
use crate::xml::node::{XmlElement, XmlNode};
use crate::xml::serialize::SerializeError;

/// Attributes of one start tag, in the order they will be written.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    pub fn add(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.attrs
            .push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Add an optional string attribute (only added if Some).
    pub fn add_opt(&mut self, key: &str, value: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(v) = value {
            self.add(key, v);
        }
        self
    }

    pub fn add_u32(&mut self, key: &str, value: u32) -> &mut Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn apply_to(&self, start: &mut BytesStart<'_>) {
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// Thin wrapper over a quick-xml [`Writer`] for the tag shapes SED-ML uses.
pub struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    pub fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    /// Write an XML declaration.
    pub fn xml_decl(&mut self) -> Result<(), SerializeError> {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        self.writer.write_event(Event::Decl(decl))?;
        Ok(())
    }

    /// Write a text element: `<name>text</name>`.
    pub fn text_elem(&mut self, name: &str, text: &str) -> Result<(), SerializeError> {
        self.writer
            .create_element(name)
            .write_text_content(BytesText::new(text))?;
        Ok(())
    }

    /// Write a numeric element in XML Schema `double` spelling.
    pub fn num_elem(&mut self, name: &str, value: f64) -> Result<(), SerializeError> {
        self.text_elem(name, &format_double(value))
    }

    /// Write an empty element with attributes: `<name attr="value"/>`.
    pub fn empty_elem_with_attrs(
        &mut self,
        name: &str,
        attrs: &AttrList,
    ) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Write a start tag with attributes; pair with [`XmlEmitter::write_end`].
    pub fn start_elem(&mut self, name: &str, attrs: &AttrList) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    pub fn write_end(&mut self, name: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write an owned XML subtree as it was read.
    pub fn island(&mut self, element: &XmlElement) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(element.name.as_str());
        for (key, value) in &element.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if element.children.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        self.island_children(&element.children)?;
        self.write_end(&element.name)
    }

    pub fn island_children(&mut self, children: &[XmlNode]) -> Result<(), SerializeError> {
        for child in children {
            match child {
                XmlNode::Element(e) => self.island(e)?,
                XmlNode::Text(t) => {
                    self.writer.write_event(Event::Text(BytesText::new(t)))?;
                }
            }
        }
        Ok(())
    }
}
