//! The schema-driven SED-ML reader.
//!
//! One generic routine reads every element kind: attributes are looked up in
//! the kind's [`AttrSpec`](crate::model::AttrSpec) table, nested tags are
//! matched against its list and child slots, and everything else is logged
//! and skipped.

use std::path::PathBuf;

use log::{debug, trace};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::LevelVersion;
use crate::math::Math;
use crate::model::attribute::{check_syntax, coerce, parse_double};
use crate::model::{ElementKind, ListOf, OperationError, SedDocument, SedElement};
use crate::xml::deserialize::DeserializeError;
use crate::xml::errors::{ErrorCode, ErrorContext, ErrorLog, SedError, Severity};
use crate::xml::quick::{Attrs, line_column, read_island, read_text, skip_element};

fn error_code(error: &OperationError) -> ErrorCode {
    match error {
        OperationError::InvalidAttributeValue { .. } => ErrorCode::InvalidAttributeValue,
        OperationError::UnexpectedAttribute { .. } => ErrorCode::AttributeNotAllowed,
        OperationError::MissingRequiredAttributes { .. } => ErrorCode::MissingRequiredAttribute,
        OperationError::DuplicateId(_) => ErrorCode::DuplicateId,
        OperationError::UnsupportedLevelVersion(_) => ErrorCode::UnsupportedLevelVersion,
        _ => ErrorCode::ElementNotAllowed,
    }
}

/// Move `xmlns:*` declarations from a wrapper tag that has no object of its
/// own (`listOf*`, `newXML`) onto the owning element.
fn hoist_namespaces(element: &mut SedElement, attrs: &Attrs) {
    for (key, uri) in attrs.iter() {
        if let Some(prefix) = key.strip_prefix("xmlns:") {
            element.add_namespace(prefix, uri);
        }
    }
}

pub(crate) struct SedReader<'s> {
    source: &'s str,
    reader: Reader<&'s [u8]>,
    buf: Vec<u8>,
    file: Option<PathBuf>,
    log: ErrorLog,
    level_version: LevelVersion,
}

impl<'s> SedReader<'s> {
    pub(crate) fn new(source: &'s str, file: Option<PathBuf>) -> Self {
        let reader = Reader::from_str(source);
        Self {
            source,
            reader,
            buf: Vec::new(),
            file,
            log: ErrorLog::new(),
            level_version: LevelVersion::default(),
        }
    }

    /// Consume the reader and return whatever could be read.
    pub(crate) fn read(mut self) -> SedDocument {
        let mut doc = SedDocument::new();
        if let Err(e) = self.read_document(&mut doc) {
            let context = self.context(None);
            self.report(
                ErrorCode::NotWellFormed,
                Severity::Fatal,
                format!("malformed XML: {}", e),
                context,
            );
        }
        debug!(
            "read SED-ML {} document with {} log entries",
            doc.level_version(),
            self.log.len()
        );
        *doc.error_log_mut() = self.log;
        doc
    }

    fn context(&self, parsing: Option<&str>) -> ErrorContext {
        let (line, column) = line_column(self.source, self.reader.buffer_position());
        let context = ErrorContext::at(line, column).with_file(self.file.clone());
        match parsing {
            Some(tag) => context.with_parsing(format!("<{}>", tag)),
            None => context,
        }
    }

    fn report(
        &mut self,
        code: ErrorCode,
        severity: Severity,
        message: impl Into<String>,
        context: ErrorContext,
    ) {
        self.log
            .push(SedError::new(code, severity, message).with_context(context));
    }

    /// The next start tag at this depth, or `None` at the enclosing end tag.
    fn next_start(&mut self) -> Result<Option<(BytesStart<'static>, bool)>, DeserializeError> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => return Ok(Some((e.into_owned(), false))),
                Event::Empty(e) => return Ok(Some((e.into_owned(), true))),
                Event::End(_) => return Ok(None),
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                Event::Text(e) if !e.iter().all(u8::is_ascii_whitespace) => {
                    trace!("ignoring character data")
                }
                Event::CData(_) => trace!("ignoring character data"),
                _ => {}
            }
        }
    }

    fn skip(&mut self, empty: bool) -> Result<(), DeserializeError> {
        if !empty {
            skip_element(&mut self.reader, &mut self.buf)?;
        }
        Ok(())
    }

    fn read_document(&mut self, doc: &mut SedDocument) -> Result<(), DeserializeError> {
        let (start, empty) = loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => break (e.into_owned(), false),
                Event::Empty(e) => break (e.into_owned(), true),
                Event::Eof => return Err(DeserializeError::UnexpectedEof),
                _ => {}
            }
        };
        let attrs = Attrs::from_start(&start, &self.reader)?;
        let context = self.context(Some(attrs.element_name()));

        if attrs.local_name() != "sedML" {
            self.report(
                ErrorCode::UnknownElement,
                Severity::Fatal,
                format!("root element must be <sedML>, found <{}>", attrs.element_name()),
                context,
            );
            return Ok(());
        }

        let Some(level_version) = self.root_level_version(&attrs, &context) else {
            return Ok(());
        };
        match SedDocument::with_level_version(level_version) {
            Ok(fresh) => *doc = fresh,
            Err(e) => {
                self.report(ErrorCode::UnsupportedLevelVersion, Severity::Fatal, e.to_string(), context);
                return Ok(());
            }
        }
        self.level_version = level_version;
        debug!("reading SED-ML {} document", level_version);

        let expected = level_version.namespace_uri().unwrap_or_default();
        match attrs.get_opt("xmlns") {
            Some(uri) if uri.trim() == expected => {}
            Some(uri) => self.report(
                ErrorCode::NamespaceMismatch,
                Severity::Error,
                format!(
                    "namespace '{}' does not match SED-ML {} (expected '{}')",
                    uri, level_version, expected
                ),
                context.clone(),
            ),
            None => self.report(
                ErrorCode::NamespaceMismatch,
                Severity::Warning,
                "<sedML> does not declare the SED-ML namespace",
                context.clone(),
            ),
        }
        for (key, uri) in attrs.iter() {
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                doc.add_namespace(prefix, uri);
            }
        }

        self.read_element_body(doc.root_mut(), &attrs, empty, &context)
    }

    /// Level and version from the root attributes, falling back to the namespace.
    fn root_level_version(&mut self, attrs: &Attrs, context: &ErrorContext) -> Option<LevelVersion> {
        let declared = match (attrs.get_opt("level"), attrs.get_opt("version")) {
            (Some(level), Some(version)) => {
                match (level.trim().parse::<u32>(), version.trim().parse::<u32>()) {
                    (Ok(level), Ok(version)) => Some(LevelVersion::new(level, version)),
                    _ => {
                        self.report(
                            ErrorCode::InvalidAttributeValue,
                            Severity::Error,
                            format!("level '{}' and version '{}' must be integers", level, version),
                            context.clone(),
                        );
                        None
                    }
                }
            }
            _ => {
                self.report(
                    ErrorCode::MissingRequiredAttribute,
                    Severity::Error,
                    "<sedML> must declare both level and version",
                    context.clone(),
                );
                None
            }
        };
        let level_version =
            declared.or_else(|| attrs.get_opt("xmlns").and_then(LevelVersion::from_namespace));

        match level_version {
            Some(lv) if lv.is_supported() => Some(lv),
            Some(lv) => {
                self.report(
                    ErrorCode::UnsupportedLevelVersion,
                    Severity::Fatal,
                    format!("SED-ML {} is not supported", lv),
                    context.clone(),
                );
                None
            }
            None => {
                self.report(
                    ErrorCode::UnsupportedLevelVersion,
                    Severity::Fatal,
                    "cannot determine the SED-ML level and version",
                    context.clone(),
                );
                None
            }
        }
    }

    fn read_element_body(
        &mut self,
        element: &mut SedElement,
        attrs: &Attrs,
        empty: bool,
        context: &ErrorContext,
    ) -> Result<(), DeserializeError> {
        self.read_attributes(element, attrs, context);
        if !empty {
            self.read_content(element)?;
        }
        self.check_required(element, context);
        Ok(())
    }

    fn read_attributes(&mut self, element: &mut SedElement, attrs: &Attrs, context: &ErrorContext) {
        let kind = element.kind();
        for (key, text) in attrs.iter() {
            if key == "xmlns" {
                continue;
            }
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                if kind != ElementKind::Document {
                    element.add_namespace(prefix, text);
                }
                continue;
            }
            if kind == ElementKind::Document && matches!(key, "level" | "version") {
                continue;
            }
            let Some(spec) = kind.attribute(key) else {
                self.report(
                    ErrorCode::UnknownAttribute,
                    Severity::Warning,
                    format!("unknown attribute '{}' on <{}> ignored", key, attrs.element_name()),
                    context.clone(),
                );
                continue;
            };
            if !spec.is_legal(self.level_version) {
                self.report(
                    ErrorCode::AttributeNotAllowed,
                    Severity::Error,
                    format!(
                        "attribute '{}' is not allowed on <{}> in SED-ML {}",
                        key,
                        attrs.element_name(),
                        self.level_version
                    ),
                    context.clone(),
                );
                continue;
            }
            let value = match coerce(spec.ty, text) {
                Ok(value) => value,
                Err(reason) => {
                    self.report(
                        ErrorCode::InvalidAttributeValue,
                        Severity::Error,
                        format!("invalid value '{}' for attribute '{}': {}", text, key, reason),
                        context.clone(),
                    );
                    continue;
                }
            };
            if let Err(reason) = check_syntax(spec.ty, &value) {
                self.report(
                    ErrorCode::InvalidAttributeValue,
                    Severity::Error,
                    format!("invalid value '{}' for attribute '{}': {}", text, key, reason),
                    context.clone(),
                );
            }
            element.store_unchecked(&spec, value);
        }
    }

    fn read_content(&mut self, element: &mut SedElement) -> Result<(), DeserializeError> {
        while let Some((start, empty)) = self.next_start()? {
            let attrs = Attrs::from_start(&start, &self.reader)?;
            self.read_nested(element, attrs, empty)?;
        }
        Ok(())
    }

    fn read_nested(
        &mut self,
        element: &mut SedElement,
        attrs: Attrs,
        empty: bool,
    ) -> Result<(), DeserializeError> {
        let kind = element.kind();
        let name = attrs.element_name().to_string();
        let context = self.context(Some(&name));
        trace!("reading <{}> in <{}>", name, kind.tag());

        if name == "notes" {
            let notes = read_island(&mut self.reader, &mut self.buf, attrs, empty)?;
            element.set_notes(notes);
        } else if name == "annotation" {
            let annotation = read_island(&mut self.reader, &mut self.buf, attrs, empty)?;
            element.set_annotation(annotation);
        } else if attrs.local_name() == "math" && kind.math().is_some() {
            let island = read_island(&mut self.reader, &mut self.buf, attrs, empty)?;
            let math = Math::from_element(island)
                .map_err(|e| DeserializeError::Custom(e.to_string()))?;
            if let Err(e) = element.set_math(math) {
                self.report(error_code(&e), Severity::Error, e.to_string(), context);
            }
        } else if kind.payload().is_some_and(|payload| payload.tag == name) {
            hoist_namespaces(element, &attrs);
            let island = read_island(&mut self.reader, &mut self.buf, attrs, empty)?;
            if let Err(e) = element.set_payload(island.children) {
                self.report(error_code(&e), Severity::Error, e.to_string(), context);
            }
        } else if name == "value" && kind.has_values() {
            let text = if empty {
                String::new()
            } else {
                read_text(&mut self.reader, &mut self.buf)?
            };
            match parse_double(&text) {
                Some(value) => {
                    if let Err(e) = element.push_value(value) {
                        self.report(error_code(&e), Severity::Error, e.to_string(), context);
                    }
                }
                None => self.report(
                    ErrorCode::InvalidAttributeValue,
                    Severity::Error,
                    format!("<value> '{}' is not a number", text),
                    context,
                ),
            }
        } else if let Some(slot) = kind.lists().iter().find(|slot| slot.list.tag() == name) {
            if !slot.availability.contains(self.level_version) {
                self.report(
                    ErrorCode::ElementNotAllowed,
                    Severity::Error,
                    format!(
                        "<{}> is not allowed in <{}> in SED-ML {}",
                        name,
                        kind.tag(),
                        self.level_version
                    ),
                    context,
                );
                return self.skip(empty);
            }
            hoist_namespaces(element, &attrs);
            match element.list_mut(slot.list) {
                Some(list) => self.read_list(list, empty)?,
                None => self.skip(empty)?,
            }
        } else if let Some(slot) = kind.children().iter().find(|slot| slot.child.tag() == name) {
            match element.create_child(slot.child) {
                Ok(child) => self.read_element_body(child, &attrs, empty, &context)?,
                Err(e) => {
                    self.report(error_code(&e), Severity::Error, e.to_string(), context);
                    self.skip(empty)?;
                }
            }
        } else {
            self.report(
                ErrorCode::UnknownElement,
                Severity::Warning,
                format!("unknown element <{}> in <{}> skipped", name, kind.tag()),
                context,
            );
            self.skip(empty)?;
        }
        Ok(())
    }

    fn read_list(&mut self, list: &mut ListOf, empty: bool) -> Result<(), DeserializeError> {
        if empty {
            return Ok(());
        }
        while let Some((start, empty)) = self.next_start()? {
            let attrs = Attrs::from_start(&start, &self.reader)?;
            let name = attrs.element_name().to_string();
            let context = self.context(Some(&name));

            let Some(kind) = list.kind().item_kind_for_tag(&name) else {
                self.report(
                    ErrorCode::UnknownElement,
                    Severity::Warning,
                    format!("<{}> is not allowed in <{}>, skipped", name, list.tag()),
                    context,
                );
                self.skip(empty)?;
                continue;
            };
            if !kind.is_legal(self.level_version) {
                self.report(
                    ErrorCode::ElementNotAllowed,
                    Severity::Error,
                    format!("<{}> is not part of SED-ML {}", name, self.level_version),
                    context,
                );
                self.skip(empty)?;
                continue;
            }

            let mut item = SedElement::new(kind, self.level_version);
            self.read_attributes(&mut item, &attrs, &context);
            if item.is_set("id") && list.get_by_id(item.string("id")).is_some() {
                self.report(
                    ErrorCode::DuplicateId,
                    Severity::Error,
                    format!("id '{}' is already used in <{}>", item.string("id"), list.tag()),
                    context.clone(),
                );
            }
            let item = list.push_unchecked(item);
            if !empty {
                self.read_content(item)?;
            }
            self.check_required(item, &context);
        }
        Ok(())
    }

    fn check_required(&mut self, element: &SedElement, context: &ErrorContext) {
        for attribute in element.missing_required_attributes() {
            self.report(
                ErrorCode::MissingRequiredAttribute,
                Severity::Error,
                format!(
                    "<{}> is missing required attribute '{}'",
                    element.kind().tag(),
                    attribute
                ),
                context.clone(),
            );
        }
        for child in element.missing_required_elements() {
            self.report(
                ErrorCode::MissingRequiredElement,
                Severity::Error,
                format!(
                    "<{}> is missing required element <{}>",
                    element.kind().tag(),
                    child
                ),
                context.clone(),
            );
        }
    }
}
