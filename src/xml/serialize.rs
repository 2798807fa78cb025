//! XML serialization using quick-xml.
//!
//! The writer walks the object tree and emits only what is legal at the
//! document's current level/version. Values stored under another pair are
//! kept in memory but skipped here with a warning.

use std::io::Write;
use std::path::Path;

use log::{debug, warn};
use quick_xml::Writer;
use thiserror::Error;

use crate::model::{SedDocument, SedElement};
use crate::xml::quick::{AttrList, XmlEmitter};

/// Errors that can occur during XML serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

impl WriteOptions {
    /// Single line, no declaration.
    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: false,
        }
    }
}

pub fn write_sedml_to_string(doc: &SedDocument) -> Result<String, SerializeError> {
    write_sedml_to_string_with_options(doc, WriteOptions::default())
}

pub fn write_sedml_to_string_with_options(
    doc: &SedDocument,
    options: WriteOptions,
) -> Result<String, SerializeError> {
    let mut writer = match options.indent {
        Some(indent) => Writer::new_with_indent(Vec::new(), b' ', indent),
        None => Writer::new(Vec::new()),
    };
    serialize_document(&mut writer, doc, options)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

pub fn write_sedml<P: AsRef<Path>>(doc: &SedDocument, path: P) -> Result<(), SerializeError> {
    write_sedml_with_options(doc, path, WriteOptions::default())
}

pub fn write_sedml_with_options<P: AsRef<Path>>(
    doc: &SedDocument,
    path: P,
    options: WriteOptions,
) -> Result<(), SerializeError> {
    let mut text = write_sedml_to_string_with_options(doc, options)?;
    text.push('\n');
    std::fs::write(path.as_ref(), text)?;
    debug!("wrote SED-ML document to {}", path.as_ref().display());
    Ok(())
}

/// Write the whole document, starting at the declaration if requested.
pub fn serialize_document<W: Write>(
    writer: &mut Writer<W>,
    doc: &SedDocument,
    options: WriteOptions,
) -> Result<(), SerializeError> {
    let level_version = doc.level_version();
    let mut emitter = XmlEmitter::new(writer);
    if options.declaration {
        emitter.xml_decl()?;
    }

    let mut attrs = AttrList::new();
    attrs.add_opt("xmlns", level_version.namespace_uri());
    let root = doc.root();
    for (prefix, uri) in doc.namespaces() {
        if !root.namespaces().iter().any(|(p, _)| p == prefix) {
            attrs.add(&format!("xmlns:{}", prefix), uri);
        }
    }
    attrs
        .add_u32("level", level_version.level)
        .add_u32("version", level_version.version);
    element_attributes(root, &mut attrs);

    serialize_element(&mut emitter, "sedML", root, &attrs)
}

/// Append the element's namespace declarations, then its set attributes in
/// schema order, skipping illegal ones.
fn element_attributes(element: &SedElement, attrs: &mut AttrList) {
    for (prefix, uri) in element.namespaces() {
        attrs.add(&format!("xmlns:{}", prefix), uri);
    }
    let level_version = element.level_version();
    for spec in element.kind().attributes() {
        let Some(value) = element.attribute(spec.name) else {
            continue;
        };
        if spec.is_legal(level_version) {
            attrs.add(spec.name, value.to_xml_string());
        } else {
            warn!(
                "not writing attribute '{}' on <{}>: not part of SED-ML {}",
                spec.name,
                element.kind().tag(),
                level_version
            );
        }
    }
}

fn has_content(element: &SedElement) -> bool {
    let level_version = element.level_version();
    element.notes().is_some()
        || element.annotation().is_some()
        || element.payload().is_some()
        || !element.values().is_empty()
        || element.math().is_some()
        || element
            .children()
            .any(|(slot, _)| slot.element_kind().is_legal(level_version))
        || element
            .lists()
            .any(|list| !list.is_empty() && element.has_list(list.kind()))
}

/// Write one element under `tag`: notes, annotation, payload, values, single
/// children, lists and finally math.
pub fn serialize_element<W: Write>(
    emitter: &mut XmlEmitter<'_, W>,
    tag: &str,
    element: &SedElement,
    attrs: &AttrList,
) -> Result<(), SerializeError> {
    if !has_content(element) {
        return emitter.empty_elem_with_attrs(tag, attrs);
    }
    let level_version = element.level_version();
    emitter.start_elem(tag, attrs)?;

    if let Some(notes) = element.notes() {
        emitter.island(notes)?;
    }
    if let Some(annotation) = element.annotation() {
        emitter.island(annotation)?;
    }
    if let (Some(spec), Some(payload)) = (element.kind().payload(), element.payload()) {
        if payload.is_empty() {
            emitter.empty_elem_with_attrs(spec.tag, &AttrList::new())?;
        } else {
            emitter.start_elem(spec.tag, &AttrList::new())?;
            emitter.island_children(payload)?;
            emitter.write_end(spec.tag)?;
        }
    }
    for value in element.values() {
        emitter.num_elem("value", *value)?;
    }

    for (slot, child) in element.children() {
        if !slot.element_kind().is_legal(level_version) {
            warn!(
                "not writing <{}> in <{}>: not part of SED-ML {}",
                slot.tag(),
                tag,
                level_version
            );
            continue;
        }
        let mut child_attrs = AttrList::new();
        element_attributes(child, &mut child_attrs);
        serialize_element(emitter, slot.tag(), child, &child_attrs)?;
    }

    for list in element.lists() {
        if list.is_empty() {
            continue;
        }
        if !element.has_list(list.kind()) {
            warn!(
                "not writing <{}> in <{}>: not part of SED-ML {}",
                list.tag(),
                tag,
                level_version
            );
            continue;
        }
        emitter.start_elem(list.tag(), &AttrList::new())?;
        for item in list {
            if !item.kind().is_legal(level_version) {
                warn!(
                    "not writing <{}>: not part of SED-ML {}",
                    item.kind().tag(),
                    level_version
                );
                continue;
            }
            let mut item_attrs = AttrList::new();
            element_attributes(item, &mut item_attrs);
            serialize_element(emitter, item.kind().tag(), item, &item_attrs)?;
        }
        emitter.write_end(list.tag())?;
    }

    if let Some(math) = element.math() {
        emitter.island(&math.to_element())?;
    }

    emitter.write_end(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LevelVersion;
    use crate::model::{ChildKind, ElementKind};
    use crate::xml::node::{XmlElement, XmlNode};

    const V4_ROOT: &str =
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4""#;

    fn compact(doc: &SedDocument) -> String {
        write_sedml_to_string_with_options(doc, WriteOptions::compact()).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let doc = SedDocument::new();
        assert_eq!(compact(&doc), format!("{}/>", V4_ROOT));

        let v1 = SedDocument::with_level_version(LevelVersion::L1V1).unwrap();
        assert_eq!(
            compact(&v1),
            r#"<sedML xmlns="http://sed-ml.org/" level="1" version="1"/>"#
        );
    }

    #[test]
    fn test_model_and_empty_lists() {
        let mut doc = SedDocument::new();
        let model = doc.create(ElementKind::Model).unwrap();
        model.set_id("m1").unwrap();
        model.set_source("model.xml").unwrap();
        assert_eq!(
            compact(&doc),
            format!(
                r#"{}><listOfModels><model id="m1" source="model.xml"/></listOfModels></sedML>"#,
                V4_ROOT
            )
        );
    }

    #[test]
    fn test_declaration_and_indent() {
        let mut doc = SedDocument::new();
        doc.create(ElementKind::Model).unwrap().set_id("m1").unwrap();
        let text = write_sedml_to_string(&doc).unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains("\n  <listOfModels>\n    <model id=\"m1\"/>"));
    }

    #[test]
    fn test_illegal_values_are_skipped() {
        let mut doc = SedDocument::new();
        let sim = doc.create(ElementKind::SteadyState).unwrap();
        sim.set_id("ss").unwrap();
        let alg = sim.create_child(ChildKind::Algorithm).unwrap();
        alg.set_id("alg").unwrap();
        alg.set_kisao_id_number(282).unwrap();
        let curve_plot = doc.create(ElementKind::Plot2D).unwrap();
        curve_plot.set_id("p").unwrap();
        curve_plot.set("legend", true).unwrap();

        doc.set_version(3).unwrap();
        let text = compact(&doc);
        assert!(!text.contains("id=\"alg\""));
        assert!(!text.contains("legend"));
        assert!(text.contains(r#"<algorithm kisaoID="KISAO:0000282"/>"#));

        // still in memory
        doc.set_version(4).unwrap();
        assert!(compact(&doc).contains("id=\"alg\""));
    }

    #[test]
    fn test_namespaces_payload_values_and_math() {
        let mut doc = SedDocument::new();
        doc.add_namespace("sbml", "http://www.sbml.org/sbml/level3/version1/core");
        let model = doc.create(ElementKind::Model).unwrap();
        model.set_id("m").unwrap();
        model.set_source("m.xml").unwrap();
        let change = model.create(ElementKind::AddXml).unwrap();
        change.set_target("/sbml:sbml").unwrap();
        change
            .set_payload(vec![XmlNode::Element(
                XmlElement::new("sbml:parameter").with_attribute("id", "k"),
            )])
            .unwrap();

        let task = doc.create(ElementKind::RepeatedTask).unwrap();
        task.set_id("rt").unwrap();
        task.create(ElementKind::VectorRange)
            .unwrap()
            .set_values(vec![1.0, f64::NEG_INFINITY])
            .unwrap();

        let text = compact(&doc);
        assert!(text.contains(r#"xmlns:sbml="http://www.sbml.org/sbml/level3/version1/core" level="1""#));
        assert!(text.contains(
            r#"<addXML target="/sbml:sbml"><newXML><sbml:parameter id="k"/></newXML></addXML>"#
        ));
        assert!(text.contains("<vectorRange><value>1</value><value>-INF</value></vectorRange>"));
    }
}
