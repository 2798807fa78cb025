//! The generic element contract shared by every SED-ML element kind.
//!
//! A [`SedElement`] is a kind tag plus an [`AttributeTable`]. What the element
//! may hold (attributes, lists, single children, math, payload) is looked up
//! in the schema tables for its kind and gated by the (level, version) it was
//! created for.

use std::collections::BTreeMap;

use crate::core::LevelVersion;
use crate::math::Math;
use crate::model::attribute::{AttrValue, AttributeTable, check_syntax, coerce};
use crate::model::error::OperationError;
use crate::model::list::ListOf;
use crate::model::schema::{AttrSpec, ChildKind, ElementKind, ListKind};
use crate::xml::node::{XmlElement, XmlNode};

#[derive(Debug, Clone, PartialEq)]
pub struct SedElement {
    kind: ElementKind,
    level_version: LevelVersion,
    attributes: AttributeTable,
    namespaces: Vec<(String, String)>,
    notes: Option<XmlElement>,
    annotation: Option<XmlElement>,
    math: Option<Math>,
    payload: Option<Vec<XmlNode>>,
    values: Vec<f64>,
    children: BTreeMap<ChildKind, SedElement>,
    lists: Vec<ListOf>,
}

impl SedElement {
    /// A fresh element with nothing set. Every list slot of the kind exists
    /// and is empty, whether or not it is legal at `level_version`.
    pub fn new(kind: ElementKind, level_version: LevelVersion) -> Self {
        Self {
            kind,
            level_version,
            attributes: AttributeTable::new(),
            namespaces: Vec::new(),
            notes: None,
            annotation: None,
            math: None,
            payload: None,
            values: Vec::new(),
            children: BTreeMap::new(),
            lists: kind
                .lists()
                .iter()
                .map(|slot| ListOf::new(slot.list, level_version))
                .collect(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn level_version(&self) -> LevelVersion {
        self.level_version
    }

    pub fn level(&self) -> u32 {
        self.level_version.level
    }

    pub fn version(&self) -> u32 {
        self.level_version.version
    }

    /// Re-stamp this element and everything below it. Stored values are kept.
    pub(crate) fn set_level_version_recursive(&mut self, level_version: LevelVersion) {
        self.level_version = level_version;
        for child in self.children.values_mut() {
            child.set_level_version_recursive(level_version);
        }
        for list in &mut self.lists {
            list.set_level_version(level_version);
        }
    }

    /// `xmlns:prefix` declarations carried on this element, in document order.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    /// Declare (or redeclare) a prefixed namespace on this element.
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.namespaces.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.namespaces.push((prefix, uri)),
        }
    }

    pub fn remove_namespace(&mut self, prefix: &str) -> bool {
        let before = self.namespaces.len();
        self.namespaces.retain(|(p, _)| p != prefix);
        self.namespaces.len() != before
    }

    // ---- attributes -------------------------------------------------------

    /// The schema entry for `name` if it is legal here.
    pub fn attribute_spec(&self, name: &str) -> Result<AttrSpec, OperationError> {
        self.kind
            .attribute(name)
            .filter(|spec| spec.is_legal(self.level_version))
            .ok_or_else(|| OperationError::unexpected_attribute(name, self.kind, self.level_version))
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.attributes.is_set(name)
    }

    /// The stored string, or `""`.
    pub fn string(&self, name: &str) -> &str {
        self.attribute(name).and_then(AttrValue::as_str).unwrap_or("")
    }

    /// The stored integer, or `0`.
    pub fn int(&self, name: &str) -> i32 {
        self.attribute(name).and_then(AttrValue::as_int).unwrap_or(0)
    }

    /// The stored double, or NaN.
    pub fn double(&self, name: &str) -> f64 {
        self.attribute(name)
            .and_then(AttrValue::as_double)
            .unwrap_or(f64::NAN)
    }

    /// The stored boolean, or `false`.
    pub fn boolean(&self, name: &str) -> bool {
        self.attribute(name)
            .and_then(AttrValue::as_bool)
            .unwrap_or(false)
    }

    /// Validate and store a typed value. On error nothing changes.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<(), OperationError> {
        let spec = self.attribute_spec(name)?;
        let value = value.into();
        check_syntax(spec.ty, &value)
            .map_err(|reason| OperationError::invalid_value(name, value.to_xml_string(), reason))?;
        self.attributes.insert(spec.name, value);
        Ok(())
    }

    /// Coerce `text` through the attribute's type, then [`SedElement::set`].
    pub fn set_attribute_str(&mut self, name: &str, text: &str) -> Result<(), OperationError> {
        let spec = self.attribute_spec(name)?;
        let value =
            coerce(spec.ty, text).map_err(|reason| OperationError::invalid_value(name, text, reason))?;
        self.set(name, value)
    }

    /// Store a value without syntax checks. The name must be in the schema.
    pub(crate) fn store_unchecked(&mut self, spec: &AttrSpec, value: AttrValue) {
        self.attributes.insert(spec.name, value);
    }

    /// Clear an attribute. Unsetting is allowed at any level/version so that
    /// values stored under an older pair can be dropped.
    pub fn unset(&mut self, name: &str) -> Result<(), OperationError> {
        if self.kind.attribute(name).is_none() {
            return Err(OperationError::unexpected_attribute(
                name,
                self.kind,
                self.level_version,
            ));
        }
        self.attributes.remove(name);
        if self.attributes.is_set(name) {
            return Err(OperationError::OperationFailed(name.to_string()));
        }
        Ok(())
    }

    /// Names of required attributes that are not set.
    pub fn missing_required_attributes(&self) -> Vec<&'static str> {
        self.kind
            .attributes()
            .filter(|spec| spec.is_required(self.level_version) && !self.is_set(spec.name))
            .map(|spec| spec.name)
            .collect()
    }

    pub fn has_required_attributes(&self) -> bool {
        self.missing_required_attributes().is_empty()
    }

    /// Tags of required child content (single children, math, payload) that is absent.
    pub fn missing_required_elements(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = self
            .kind
            .children()
            .iter()
            .filter(|slot| {
                slot.required
                    && slot.child.element_kind().is_legal(self.level_version)
                    && !self.children.contains_key(&slot.child)
            })
            .map(|slot| slot.child.tag())
            .collect();
        if self.kind.math() == Some(true) && self.math.is_none() {
            missing.push("math");
        }
        if let Some(payload) = self.kind.payload() {
            if payload.required && self.payload.is_none() {
                missing.push(payload.tag);
            }
        }
        missing
    }

    pub fn has_required_elements(&self) -> bool {
        self.missing_required_elements().is_empty()
    }

    // ---- notes and annotation ---------------------------------------------

    pub fn notes(&self) -> Option<&XmlElement> {
        self.notes.as_ref()
    }

    /// Store notes. Content that is not already a `<notes>` element is wrapped in one.
    pub fn set_notes(&mut self, notes: XmlElement) {
        self.notes = Some(wrap_island("notes", notes));
    }

    pub fn is_set_notes(&self) -> bool {
        self.notes.is_some()
    }

    pub fn unset_notes(&mut self) {
        self.notes = None;
    }

    pub fn annotation(&self) -> Option<&XmlElement> {
        self.annotation.as_ref()
    }

    pub fn set_annotation(&mut self, annotation: XmlElement) {
        self.annotation = Some(wrap_island("annotation", annotation));
    }

    pub fn is_set_annotation(&self) -> bool {
        self.annotation.is_some()
    }

    pub fn unset_annotation(&mut self) {
        self.annotation = None;
    }

    // ---- math, payload, values --------------------------------------------

    pub fn math(&self) -> Option<&Math> {
        self.math.as_ref()
    }

    pub fn set_math(&mut self, math: Math) -> Result<(), OperationError> {
        if self.kind.math().is_none() {
            return Err(self.unexpected_element("math"));
        }
        self.math = Some(math);
        Ok(())
    }

    pub fn is_set_math(&self) -> bool {
        self.math.is_some()
    }

    pub fn unset_math(&mut self) {
        self.math = None;
    }

    /// Content of the kind's verbatim payload (`newXML`, `dimensionDescription`).
    pub fn payload(&self) -> Option<&[XmlNode]> {
        self.payload.as_deref()
    }

    pub fn set_payload(&mut self, content: Vec<XmlNode>) -> Result<(), OperationError> {
        match self.kind.payload() {
            Some(_) => {
                self.payload = Some(content);
                Ok(())
            }
            None => Err(self.unexpected_element("newXML")),
        }
    }

    pub fn is_set_payload(&self) -> bool {
        self.payload.is_some()
    }

    pub fn unset_payload(&mut self) {
        self.payload = None;
    }

    /// The `<value>` entries of a vector range.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<f64>) -> Result<(), OperationError> {
        if !self.kind.has_values() {
            return Err(self.unexpected_element("value"));
        }
        self.values = values;
        Ok(())
    }

    pub fn push_value(&mut self, value: f64) -> Result<(), OperationError> {
        if !self.kind.has_values() {
            return Err(self.unexpected_element("value"));
        }
        self.values.push(value);
        Ok(())
    }

    // ---- single children --------------------------------------------------

    pub fn child(&self, child: ChildKind) -> Option<&SedElement> {
        self.children.get(&child)
    }

    pub fn child_mut(&mut self, child: ChildKind) -> Option<&mut SedElement> {
        self.children.get_mut(&child)
    }

    /// Create (replacing any existing) the child in `slot` and return it.
    pub fn create_child(&mut self, slot: ChildKind) -> Result<&mut SedElement, OperationError> {
        self.check_child_slot(slot)?;
        let child = SedElement::new(slot.element_kind(), self.level_version);
        self.children.insert(slot, child);
        self.children
            .get_mut(&slot)
            .ok_or_else(|| OperationError::OperationFailed(slot.tag().to_string()))
    }

    /// Store a copy of `element` in `slot`.
    pub fn set_child(&mut self, slot: ChildKind, element: &SedElement) -> Result<(), OperationError> {
        self.check_child_slot(slot)?;
        if element.kind != slot.element_kind() {
            return Err(OperationError::UnexpectedElement {
                element: element.kind.tag(),
                parent: self.kind.tag(),
                level_version: self.level_version,
            });
        }
        if element.level_version != self.level_version {
            return Err(OperationError::LevelVersionMismatch {
                expected: self.level_version,
                found: element.level_version,
            });
        }
        self.children.insert(slot, element.clone());
        Ok(())
    }

    pub fn remove_child(&mut self, slot: ChildKind) -> Option<SedElement> {
        self.children.remove(&slot)
    }

    pub fn children(&self) -> impl Iterator<Item = (ChildKind, &SedElement)> {
        self.children.iter().map(|(k, v)| (*k, v))
    }

    fn check_child_slot(&self, slot: ChildKind) -> Result<(), OperationError> {
        if self.kind.child_slot(slot).is_none()
            || !slot.element_kind().is_legal(self.level_version)
        {
            return Err(self.unexpected_element(slot.tag()));
        }
        Ok(())
    }

    // ---- lists ------------------------------------------------------------

    pub fn list(&self, list: ListKind) -> Option<&ListOf> {
        self.lists.iter().find(|l| l.kind() == list)
    }

    pub fn list_mut(&mut self, list: ListKind) -> Option<&mut ListOf> {
        self.lists.iter_mut().find(|l| l.kind() == list)
    }

    pub fn lists(&self) -> impl Iterator<Item = &ListOf> {
        self.lists.iter()
    }

    pub(crate) fn lists_mut(&mut self) -> impl Iterator<Item = &mut ListOf> {
        self.lists.iter_mut()
    }

    /// Whether `list` is a slot of this kind that is legal at this level/version.
    pub fn has_list(&self, list: ListKind) -> bool {
        self.kind
            .list_slot(list)
            .is_some_and(|slot| slot.availability.contains(self.level_version))
    }

    /// Create an item of `kind` in the first legal list of this element that accepts it.
    pub fn create(&mut self, kind: ElementKind) -> Result<&mut SedElement, OperationError> {
        let list = self
            .kind
            .lists()
            .iter()
            .find(|slot| slot.list.accepts(kind) && slot.availability.contains(self.level_version))
            .map(|slot| slot.list)
            .ok_or_else(|| self.unexpected_element(kind.tag()))?;
        let missing = self.unexpected_element(kind.tag());
        self.list_mut(list).ok_or(missing)?.create(kind)
    }

    /// Add a copy of `element` to the first legal list that accepts its kind.
    pub fn add(&mut self, element: &SedElement) -> Result<(), OperationError> {
        let list = self
            .kind
            .lists()
            .iter()
            .find(|slot| {
                slot.list.accepts(element.kind) && slot.availability.contains(self.level_version)
            })
            .map(|slot| slot.list)
            .ok_or_else(|| self.unexpected_element(element.kind.tag()))?;
        let missing = self.unexpected_element(element.kind.tag());
        self.list_mut(list).ok_or(missing)?.add(element)
    }

    // ---- traversal --------------------------------------------------------

    /// Visit this element and every descendant, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SedElement)) {
        visit(self);
        for child in self.children.values() {
            child.walk(visit);
        }
        for list in &self.lists {
            for item in list.iter() {
                item.walk(visit);
            }
        }
    }

    /// Visit every list in this subtree, outermost first.
    pub(crate) fn walk_lists_mut(&mut self, visit: &mut impl FnMut(&mut ListOf)) {
        for child in self.children.values_mut() {
            child.walk_lists_mut(visit);
        }
        for list in &mut self.lists {
            visit(list);
            for item in list.iter_mut() {
                item.walk_lists_mut(visit);
            }
        }
    }

    fn unexpected_element(&self, element: &'static str) -> OperationError {
        OperationError::UnexpectedElement {
            element,
            parent: self.kind.tag(),
            level_version: self.level_version,
        }
    }
}

fn wrap_island(tag: &str, content: XmlElement) -> XmlElement {
    if content.local_name() == tag {
        content
    } else {
        XmlElement::new(tag).with_child(content)
    }
}
