//! Ordered, id-indexed element containers.

use itertools::Itertools;

use crate::core::LevelVersion;
use crate::model::element::SedElement;
use crate::model::error::OperationError;
use crate::model::schema::{ElementKind, ListKind};

/// A `listOf*` container. Items are owned and kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOf {
    kind: ListKind,
    level_version: LevelVersion,
    items: Vec<SedElement>,
}

impl ListOf {
    pub fn new(kind: ListKind, level_version: LevelVersion) -> Self {
        Self {
            kind,
            level_version,
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn level_version(&self) -> LevelVersion {
        self.level_version
    }

    pub(crate) fn set_level_version(&mut self, level_version: LevelVersion) {
        self.level_version = level_version;
        for item in &mut self.items {
            item.set_level_version_recursive(level_version);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SedElement> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SedElement> {
        self.items.get_mut(index)
    }

    /// The first item whose `id` equals `id`.
    pub fn get_by_id(&self, id: &str) -> Option<&SedElement> {
        self.items.iter().find(|item| item.string("id") == id && item.is_set("id"))
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut SedElement> {
        self.items
            .iter_mut()
            .find(|item| item.string("id") == id && item.is_set("id"))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SedElement> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, SedElement> {
        self.items.iter_mut()
    }

    pub fn items(&self) -> &[SedElement] {
        &self.items
    }

    /// Ids that occur more than once, each reported once.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.is_set("id"))
            .map(|item| item.string("id"))
            .duplicates()
            .collect()
    }

    /// Append a deep copy of `element`.
    ///
    /// The copy must be an allowed kind, created for the same level/version,
    /// carry every required attribute and not reuse an id already present.
    pub fn add(&mut self, element: &SedElement) -> Result<(), OperationError> {
        self.check_kind(element.kind())?;
        if element.level_version() != self.level_version {
            return Err(OperationError::LevelVersionMismatch {
                expected: self.level_version,
                found: element.level_version(),
            });
        }
        let missing = element.missing_required_attributes();
        if !missing.is_empty() {
            return Err(OperationError::MissingRequiredAttributes {
                element: element.kind().tag(),
                missing,
            });
        }
        if element.is_set("id") && self.get_by_id(element.string("id")).is_some() {
            return Err(OperationError::DuplicateId(element.string("id").to_string()));
        }
        self.items.push(element.clone());
        Ok(())
    }

    /// Append a new, empty item of `kind` and return it for population.
    pub fn create(&mut self, kind: ElementKind) -> Result<&mut SedElement, OperationError> {
        self.check_kind(kind)?;
        self.items.push(SedElement::new(kind, self.level_version));
        self.items
            .last_mut()
            .ok_or_else(|| OperationError::OperationFailed(kind.tag().to_string()))
    }

    /// Append without any checks; the reader logs problems instead.
    pub(crate) fn push_unchecked(&mut self, element: SedElement) -> &mut SedElement {
        self.items.push(element);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn remove(&mut self, index: usize) -> Option<SedElement> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<SedElement> {
        let index = self
            .items
            .iter()
            .position(|item| item.is_set("id") && item.string("id") == id)?;
        Some(self.items.remove(index))
    }

    /// Stable sort by `order` for lists whose items carry one.
    ///
    /// Nothing happens unless every item has `order` set. Returns whether
    /// the list was sorted.
    pub fn sort_by_order(&mut self) -> bool {
        if !self.kind.is_ordered()
            || self.items.is_empty()
            || !self.items.iter().all(|item| item.is_set("order"))
        {
            return false;
        }
        self.items.sort_by_key(|item| item.int("order"));
        true
    }

    fn check_kind(&self, kind: ElementKind) -> Result<(), OperationError> {
        if !self.kind.accepts(kind) || !kind.is_legal(self.level_version) {
            return Err(OperationError::UnexpectedElement {
                element: kind.tag(),
                parent: self.kind.tag(),
                level_version: self.level_version,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ListOf {
    type Item = &'a SedElement;
    type IntoIter = std::slice::Iter<'a, SedElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> SedElement {
        let mut m = SedElement::new(ElementKind::Model, LevelVersion::L1V4);
        m.set("id", id).unwrap();
        m.set("source", "model.xml").unwrap();
        m
    }

    #[test]
    fn test_add_get_remove() {
        let mut list = ListOf::new(ListKind::Models, LevelVersion::L1V4);
        list.add(&model("m1")).unwrap();
        list.add(&model("m2")).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().string("id"), "m2");
        assert_eq!(list.get_by_id("m1").unwrap().string("source"), "model.xml");
        assert!(list.get_by_id("m3").is_none());
        assert!(list.get(2).is_none());

        let removed = list.remove_by_id("m1").unwrap();
        assert_eq!(removed.string("id"), "m1");
        assert_eq!(list.get(0).unwrap().string("id"), "m2");
        assert!(list.remove(5).is_none());
        assert!(list.remove(0).is_some());
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_is_a_copy() {
        let mut list = ListOf::new(ListKind::Models, LevelVersion::L1V4);
        let mut m = model("m1");
        list.add(&m).unwrap();
        m.set("source", "other.xml").unwrap();
        assert_eq!(list.get(0).unwrap().string("source"), "model.xml");
    }

    #[test]
    fn test_add_rejections() {
        let mut list = ListOf::new(ListKind::Models, LevelVersion::L1V4);
        list.add(&model("m1")).unwrap();

        assert_eq!(
            list.add(&model("m1")),
            Err(OperationError::DuplicateId("m1".to_string()))
        );

        let incomplete = SedElement::new(ElementKind::Model, LevelVersion::L1V4);
        assert!(matches!(
            list.add(&incomplete),
            Err(OperationError::MissingRequiredAttributes { ref missing, .. }) if missing == &["id", "source"]
        ));

        let mut old = SedElement::new(ElementKind::Model, LevelVersion::L1V3);
        old.set("id", "m9").unwrap();
        old.set("source", "a.xml").unwrap();
        assert!(matches!(
            list.add(&old),
            Err(OperationError::LevelVersionMismatch { .. })
        ));

        let task = SedElement::new(ElementKind::Task, LevelVersion::L1V4);
        assert!(matches!(
            list.add(&task),
            Err(OperationError::UnexpectedElement { .. })
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_create_checks_kind_and_version() {
        let mut tasks = ListOf::new(ListKind::Tasks, LevelVersion::L1V3);
        tasks.create(ElementKind::RepeatedTask).unwrap();
        assert!(matches!(
            tasks.create(ElementKind::ParameterEstimationTask),
            Err(OperationError::UnexpectedElement { .. })
        ));
        assert!(tasks.create(ElementKind::Model).is_err());
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_sort_by_order() {
        let mut curves = ListOf::new(ListKind::Curves, LevelVersion::L1V4);
        for (id, order) in [("c", 3), ("a", 1), ("b", 2), ("a2", 1)] {
            let curve = curves.create(ElementKind::Curve).unwrap();
            curve.set("id", id).unwrap();
            curve.set("order", order).unwrap();
        }
        assert!(curves.sort_by_order());
        let ids: Vec<_> = curves.iter().map(|c| c.string("id")).collect();
        assert_eq!(ids, ["a", "a2", "b", "c"]);
    }

    #[test]
    fn test_sort_skipped_with_partial_order() {
        let mut curves = ListOf::new(ListKind::Curves, LevelVersion::L1V4);
        curves.create(ElementKind::Curve).unwrap().set("order", 2).unwrap();
        curves.create(ElementKind::Curve).unwrap().set("id", "unordered").unwrap();
        curves.create(ElementKind::Curve).unwrap().set("order", 1).unwrap();

        assert!(!curves.sort_by_order());
        assert_eq!(curves.get(1).unwrap().string("id"), "unordered");
        assert_eq!(curves.get(0).unwrap().int("order"), 2);

        let mut models = ListOf::new(ListKind::Models, LevelVersion::L1V4);
        assert!(!models.sort_by_order());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut list = ListOf::new(ListKind::Models, LevelVersion::L1V4);
        list.push_unchecked(model("m1"));
        list.push_unchecked(model("m1"));
        list.push_unchecked(model("m1"));
        list.push_unchecked(model("m2"));
        assert_eq!(list.duplicate_ids(), ["m1"]);
    }
}
