//! The `<sedML>` document root.

use log::debug;

use crate::core::LevelVersion;
use crate::model::element::SedElement;
use crate::model::error::OperationError;
use crate::model::list::ListOf;
use crate::model::schema::{ElementKind, ListKind};
use crate::xml::errors::{ErrorLog, Severity};

/// A SED-ML document.
///
/// The document owns the (level, version) pair that gates what every element
/// in the tree may hold, the extra namespace declarations of the root element
/// and the log of problems found while reading or checking it.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDocument {
    root: SedElement,
    namespaces: Vec<(String, String)>,
    error_log: ErrorLog,
}

impl Default for SedDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SedDocument {
    /// An empty document at the latest supported level/version.
    pub fn new() -> Self {
        Self {
            root: SedElement::new(ElementKind::Document, LevelVersion::default()),
            namespaces: Vec::new(),
            error_log: ErrorLog::new(),
        }
    }

    pub fn with_level_version(level_version: LevelVersion) -> Result<Self, OperationError> {
        if !level_version.is_supported() {
            return Err(OperationError::UnsupportedLevelVersion(level_version));
        }
        Ok(Self {
            root: SedElement::new(ElementKind::Document, level_version),
            ..Self::new()
        })
    }

    pub fn level_version(&self) -> LevelVersion {
        self.root.level_version()
    }

    pub fn level(&self) -> u32 {
        self.root.level()
    }

    pub fn version(&self) -> u32 {
        self.root.version()
    }

    /// Change the pair for the whole tree.
    ///
    /// Stored values are kept even if they are not legal at the new pair;
    /// getters still return them and the writer skips them.
    pub fn set_level_version(&mut self, level_version: LevelVersion) -> Result<(), OperationError> {
        if !level_version.is_supported() {
            return Err(OperationError::UnsupportedLevelVersion(level_version));
        }
        debug!(
            "changing document level/version {} -> {}",
            self.level_version(),
            level_version
        );
        self.root.set_level_version_recursive(level_version);
        Ok(())
    }

    pub fn set_level(&mut self, level: u32) -> Result<(), OperationError> {
        self.set_level_version(LevelVersion::new(level, self.version()))
    }

    pub fn set_version(&mut self, version: u32) -> Result<(), OperationError> {
        self.set_level_version(LevelVersion::new(self.level(), version))
    }

    /// The root element, for its own attributes, notes and annotation.
    pub fn root(&self) -> &SedElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SedElement {
        &mut self.root
    }

    pub fn list(&self, list: ListKind) -> Option<&ListOf> {
        self.root.list(list)
    }

    pub fn list_mut(&mut self, list: ListKind) -> Option<&mut ListOf> {
        self.root.list_mut(list)
    }

    /// Create a top-level element (model, task, output, ...) in its list.
    pub fn create(&mut self, kind: ElementKind) -> Result<&mut SedElement, OperationError> {
        self.root.create(kind)
    }

    /// Add a copy of a top-level element to its list.
    pub fn add(&mut self, element: &SedElement) -> Result<(), OperationError> {
        self.root.add(element)
    }

    fn items(&self, list: ListKind) -> impl Iterator<Item = &SedElement> {
        self.list(list).into_iter().flat_map(ListOf::iter)
    }

    pub fn data_descriptions(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::DataDescriptions)
    }

    pub fn models(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::Models)
    }

    pub fn simulations(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::Simulations)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::Tasks)
    }

    pub fn data_generators(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::DataGenerators)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::Outputs)
    }

    pub fn styles(&self) -> impl Iterator<Item = &SedElement> {
        self.items(ListKind::Styles)
    }

    pub fn model(&self, id: &str) -> Option<&SedElement> {
        self.list(ListKind::Models)?.get_by_id(id)
    }

    pub fn simulation(&self, id: &str) -> Option<&SedElement> {
        self.list(ListKind::Simulations)?.get_by_id(id)
    }

    pub fn task(&self, id: &str) -> Option<&SedElement> {
        self.list(ListKind::Tasks)?.get_by_id(id)
    }

    pub fn data_generator(&self, id: &str) -> Option<&SedElement> {
        self.list(ListKind::DataGenerators)?.get_by_id(id)
    }

    pub fn output(&self, id: &str) -> Option<&SedElement> {
        self.list(ListKind::Outputs)?.get_by_id(id)
    }

    pub fn style(&self, id: &str) -> Option<&SedElement> {
        self.list(ListKind::Styles)?.get_by_id(id)
    }

    /// The first element anywhere in the tree with this id.
    pub fn element_by_id(&self, id: &str) -> Option<&SedElement> {
        let mut found = None;
        self.root.walk(&mut |element| {
            if found.is_none() && element.is_set("id") && element.string("id") == id {
                found = Some(element);
            }
        });
        found
    }

    /// Extra `xmlns:prefix` declarations carried on the root element.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    /// Declare (or redeclare) a prefixed namespace on the root element.
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

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    pub fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.error_log
    }

    /// Number of logged problems with exactly this severity.
    pub fn num_errors(&self, severity: Severity) -> usize {
        self.error_log.num_errors(severity)
    }

    /// Sort every curve, surface and subTask list by `order`.
    ///
    /// Lists where any item lacks `order` are left as they are. Returns the
    /// number of lists sorted.
    pub fn sort_ordered_objects(&mut self) -> usize {
        let mut sorted = 0;
        self.root.walk_lists_mut(&mut |list| {
            if list.sort_by_order() {
                sorted += 1;
            }
        });
        debug!("sorted {} ordered lists", sorted);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::ChildKind;

    fn plot_with_curves(doc: &mut SedDocument, orders: &[(&str, Option<i32>)]) {
        let plot = doc.create(ElementKind::Plot2D).unwrap();
        plot.set_id("plot1").unwrap();
        for (id, order) in orders {
            let curve = plot.create(ElementKind::Curve).unwrap();
            curve.set_id(id).unwrap();
            if let Some(order) = order {
                curve.set_order(*order).unwrap();
            }
        }
    }

    fn curve_ids(doc: &SedDocument) -> Vec<String> {
        doc.output("plot1")
            .and_then(|p| p.list(ListKind::Curves))
            .map(|l| l.iter().map(|c| c.id().to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_defaults() {
        let doc = SedDocument::new();
        assert_eq!(doc.level_version(), LevelVersion::L1V4);
        assert_eq!(doc.models().count(), 0);
        assert!(doc.error_log().is_empty());
    }

    #[test]
    fn test_unsupported_pair() {
        assert!(SedDocument::with_level_version(LevelVersion::new(2, 1)).is_err());
        let mut doc = SedDocument::new();
        assert_eq!(
            doc.set_version(9),
            Err(OperationError::UnsupportedLevelVersion(LevelVersion::new(1, 9)))
        );
        assert_eq!(doc.version(), 4);
    }

    #[test]
    fn test_level_version_change_keeps_values() {
        let mut doc = SedDocument::new();
        let sim = doc.create(ElementKind::UniformTimeCourse).unwrap();
        sim.set_id("sim1").unwrap();
        let alg = sim.create_child(ChildKind::Algorithm).unwrap();
        alg.set_id("alg1").unwrap();

        doc.set_version(3).unwrap();
        let alg = doc
            .simulation("sim1")
            .and_then(|s| s.child(ChildKind::Algorithm))
            .unwrap();
        assert_eq!(alg.level_version(), LevelVersion::L1V3);
        assert!(alg.is_set_id());
        assert_eq!(alg.id(), "alg1");

        let sim = doc.list_mut(ListKind::Simulations).unwrap().get_mut(0).unwrap();
        let alg = sim.child_mut(ChildKind::Algorithm).unwrap();
        assert!(alg.set_id("alg2").is_err());
        alg.unset_id().unwrap();
        assert!(!alg.is_set_id());
    }

    #[test]
    fn test_sort_ordered_objects() {
        let mut doc = SedDocument::new();
        plot_with_curves(
            &mut doc,
            &[("red_line", Some(3)), ("green_line", Some(1)), ("purple_line", Some(2))],
        );
        assert_eq!(doc.sort_ordered_objects(), 1);
        assert_eq!(curve_ids(&doc), ["green_line", "purple_line", "red_line"]);
    }

    #[test]
    fn test_sort_ordered_objects_partial_order() {
        let mut doc = SedDocument::new();
        plot_with_curves(&mut doc, &[("b", Some(2)), ("a", None), ("c", Some(1))]);
        assert_eq!(doc.sort_ordered_objects(), 0);
        assert_eq!(curve_ids(&doc), ["b", "a", "c"]);
    }

    #[test]
    fn test_namespaces() {
        let mut doc = SedDocument::new();
        doc.add_namespace("sbml", "http://www.sbml.org/sbml/level2");
        doc.add_namespace("sbml", "http://www.sbml.org/sbml/level3/version1/core");
        assert_eq!(doc.namespaces().len(), 1);
        assert_eq!(doc.namespaces()[0].1, "http://www.sbml.org/sbml/level3/version1/core");
        assert!(doc.remove_namespace("sbml"));
        assert!(!doc.remove_namespace("sbml"));
    }

    #[test]
    fn test_element_by_id() {
        let mut doc = SedDocument::new();
        plot_with_curves(&mut doc, &[("c1", None)]);
        assert_eq!(doc.element_by_id("c1").unwrap().kind(), ElementKind::Curve);
        assert!(doc.element_by_id("missing").is_none());
    }
}
