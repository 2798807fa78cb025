//! Deserialization helpers for quick-xml.
//!
//! Provides:
//! - `Attrs`: decoded attributes of one start tag, in document order
//! - `skip_element`: robust subtree skipping for unknown elements
//! - `read_text`: text content of a simple element
//! - `read_island`: an arbitrary subtree as an owned [`XmlElement`]

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::xml::deserialize::DeserializeError;
use crate::xml::node::{XmlElement, XmlNode};

/// The decoded attributes of a start tag.
///
/// Values are decoded and unescaped once. Order is preserved so that foreign
/// attributes and namespace declarations are written back as they were read.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
    /// The qualified element name, for islands and error messages
    element_name: String,
}

impl Attrs {
    /// Parse attributes from a `BytesStart` event.
    pub fn from_start<R>(
        start: &BytesStart<'_>,
        reader: &Reader<R>,
    ) -> Result<Self, DeserializeError> {
        let element_name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut pairs = Vec::new();

        for attr_result in start.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader)?.to_string();
            pairs.push((key, value));
        }

        Ok(Self {
            pairs,
            element_name,
        })
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// The element name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.element_name
            .rsplit_once(':')
            .map_or(self.element_name.as_str(), |(_, local)| local)
    }

    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// Skip an entire element subtree, consuming all nested content until the matching end tag.
///
/// Call this when you've just consumed a `Start` event. For `Empty` elements
/// there is nothing to skip.
pub fn skip_element<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
) -> Result<(), DeserializeError> {
    let mut depth = 1u32;

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }
}

/// Read text content up to the end tag of the current element, trimmed.
///
/// Nested elements are skipped; their text is not collected.
pub fn read_text<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
) -> Result<String, DeserializeError> {
    let mut text = String::new();

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::Start(_) => skip_element(reader, buf)?,
            Event::End(_) => break,
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

/// Whitespace that only lays out markup: empty, or blank and spanning a line break.
fn is_layout(text: &str) -> bool {
    text.trim().is_empty() && (text.is_empty() || text.contains('\n'))
}

/// Read the element whose start tag produced `attrs` into an owned tree.
///
/// `empty` is true for `<tag/>`, in which case no further events are consumed.
/// Text is kept as written, except for blank runs that contain a line break.
pub fn read_island<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
    attrs: Attrs,
    empty: bool,
) -> Result<XmlElement, DeserializeError> {
    let name = attrs.element_name().to_string();
    let mut element = XmlElement {
        name,
        attributes: attrs.into_pairs(),
        children: Vec::new(),
    };
    if empty {
        return Ok(element);
    }

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(e) => {
                let e = e.into_owned();
                let child_attrs = Attrs::from_start(&e, reader)?;
                let child = read_island(reader, buf, child_attrs, false)?;
                element.children.push(XmlNode::Element(child));
            }
            Event::Empty(e) => {
                let e = e.into_owned();
                let child_attrs = Attrs::from_start(&e, reader)?;
                element
                    .children
                    .push(XmlNode::Element(read_island(reader, buf, child_attrs, true)?));
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                if !is_layout(&text) {
                    element.children.push(XmlNode::Text(text));
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                element.children.push(XmlNode::Text(text));
            }
            Event::End(_) => return Ok(element),
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }
}

/// 1-based line and column of a byte offset in `source`.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|b| **b == b'\n').count() + 1;
    let column = match before.iter().rposition(|b| *b == b'\n') {
        Some(newline) => offset - newline,
        None => offset + 1,
    };
    (line, column)
}
