//! Whole-document consistency checks.
//!
//! These go beyond what a single mutator can see: ids must be unique within
//! their list, required content must be present, and every `SIdRef` must
//! resolve to an element of the right kind somewhere in the document.

use std::collections::BTreeSet;

use crate::model::document::SedDocument;
use crate::model::element::SedElement;
use crate::model::schema::{ElementKind, ListKind};
use crate::xml::errors::{ErrorCode, SedError, Severity};

/// Ids of every element of the listed kinds.
fn ids_of<'a>(doc: &'a SedDocument, kinds: &[ElementKind]) -> BTreeSet<&'a str> {
    let mut ids = BTreeSet::new();
    doc.root().walk(&mut |element| {
        if kinds.contains(&element.kind()) && element.is_set("id") {
            ids.insert(element.string("id"));
        }
    });
    ids
}

struct Targets<'a> {
    models: BTreeSet<&'a str>,
    simulations: BTreeSet<&'a str>,
    tasks: BTreeSet<&'a str>,
    ranges: BTreeSet<&'a str>,
    data_generators: BTreeSet<&'a str>,
    outputs: BTreeSet<&'a str>,
    styles: BTreeSet<&'a str>,
    data_sources: BTreeSet<&'a str>,
}

impl<'a> Targets<'a> {
    fn collect(doc: &'a SedDocument) -> Self {
        use ElementKind as K;
        Self {
            models: ids_of(doc, &[K::Model]),
            simulations: ids_of(doc, &[K::UniformTimeCourse, K::OneStep, K::SteadyState, K::Analysis]),
            tasks: ids_of(doc, &[K::Task, K::RepeatedTask, K::ParameterEstimationTask]),
            ranges: ids_of(doc, &[K::UniformRange, K::VectorRange, K::FunctionalRange, K::DataRange]),
            data_generators: ids_of(doc, &[K::DataGenerator]),
            outputs: ids_of(doc, &[K::Report, K::Plot2D, K::Plot3D, K::Figure]),
            styles: ids_of(doc, &[K::Style]),
            data_sources: ids_of(doc, &[K::DataSource]),
        }
    }

    /// The id set an attribute of `kind` must resolve into, and a label for messages.
    fn for_reference(&self, kind: ElementKind, attribute: &str) -> Option<(&BTreeSet<&'a str>, &'static str)> {
        use ElementKind as K;
        let target = match (kind, attribute) {
            (_, "modelReference") => (&self.models, "model"),
            (K::Task, "simulationReference") => (&self.simulations, "simulation"),
            (K::SubTask, "task") | (K::Variable, "taskReference") => (&self.tasks, "task"),
            (K::RepeatedTask | K::SetValue | K::FunctionalRange, "range") => (&self.ranges, "range"),
            (K::DataRange, "sourceRef") | (K::FitMapping, "dataSource") => {
                (&self.data_sources, "data source")
            }
            (K::SubPlot, "plot") => (&self.outputs, "output"),
            (_, "style" | "baseStyle") => (&self.styles, "style"),
            (
                K::DataSet | K::Curve | K::ShadedArea | K::Surface,
                "dataReference" | "xDataReference" | "yDataReference" | "zDataReference"
                | "yDataReferenceFrom" | "yDataReferenceTo" | "xErrorUpper" | "xErrorLower"
                | "yErrorUpper" | "yErrorLower",
            ) => (&self.data_generators, "data generator"),
            _ => return None,
        };
        Some(target)
    }
}

fn describe(element: &SedElement) -> String {
    if element.is_set("id") {
        format!("<{} id=\"{}\">", element.kind().tag(), element.string("id"))
    } else {
        format!("<{}>", element.kind().tag())
    }
}

fn error(code: ErrorCode, message: String) -> SedError {
    SedError::new(code, Severity::Error, message)
}

fn check_required(element: &SedElement, errors: &mut Vec<SedError>) {
    for attribute in element.missing_required_attributes() {
        errors.push(error(
            ErrorCode::MissingRequiredAttribute,
            format!("{} is missing required attribute '{}'", describe(element), attribute),
        ));
    }
    for child in element.missing_required_elements() {
        errors.push(error(
            ErrorCode::MissingRequiredElement,
            format!("{} is missing required element <{}>", describe(element), child),
        ));
    }
}

fn check_duplicates(element: &SedElement, errors: &mut Vec<SedError>) {
    for list in element.lists() {
        for id in list.duplicate_ids() {
            errors.push(error(
                ErrorCode::DuplicateId,
                format!("id '{}' is used more than once in <{}>", id, list.tag()),
            ));
        }
    }
}

fn check_references(element: &SedElement, targets: &Targets<'_>, errors: &mut Vec<SedError>) {
    for (name, value) in element.attributes().iter() {
        let Some((ids, label)) = targets.for_reference(element.kind(), name) else {
            continue;
        };
        let Some(reference) = value.as_str() else {
            continue;
        };
        if !ids.contains(reference) {
            errors.push(error(
                ErrorCode::DanglingReference,
                format!(
                    "{} {} '{}' does not refer to any {}",
                    describe(element),
                    name,
                    reference,
                    label
                ),
            ));
        }
    }

    // `source="#id"` points at another model in the same document
    if element.kind() == ElementKind::Model {
        if let Some(id) = element.string("source").strip_prefix('#') {
            if !targets.models.contains(id) {
                errors.push(error(
                    ErrorCode::DanglingReference,
                    format!("{} source '#{}' does not refer to any model", describe(element), id),
                ));
            }
        }
    }
}

/// Math in a data generator may only name its own variables and parameters.
fn check_math_identifiers(element: &SedElement, errors: &mut Vec<SedError>) {
    if element.kind() != ElementKind::DataGenerator {
        return;
    }
    let Some(math) = element.math() else {
        return;
    };
    let local: BTreeSet<&str> = [ListKind::Variables, ListKind::Parameters]
        .into_iter()
        .filter_map(|list| element.list(list))
        .flat_map(|list| list.iter())
        .filter(|item| item.is_set("id"))
        .map(|item| item.string("id"))
        .collect();
    for name in math.identifiers() {
        if !local.contains(name.as_str()) {
            errors.push(SedError::new(
                ErrorCode::DanglingReference,
                Severity::Warning,
                format!(
                    "{} math uses '{}', which is not one of its variables or parameters",
                    describe(element),
                    name
                ),
            ));
        }
    }
}

/// Every consistency problem in `doc`, in document order.
pub fn consistency_errors(doc: &SedDocument) -> Vec<SedError> {
    let targets = Targets::collect(doc);
    let mut errors = Vec::new();
    doc.root().walk(&mut |element| {
        check_required(element, &mut errors);
        check_duplicates(element, &mut errors);
        check_references(element, &targets, &mut errors);
        check_math_identifiers(element, &mut errors);
    });
    errors
}

impl SedDocument {
    /// Run [`consistency_errors`] and append the results to the error log.
    ///
    /// Returns the number of entries added.
    pub fn check_consistency(&mut self) -> usize {
        let errors = consistency_errors(self);
        let count = errors.len();
        for e in errors {
            self.error_log_mut().push(e);
        }
        count
    }
}
