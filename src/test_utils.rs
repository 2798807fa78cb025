#![cfg(test)]

use crate::core::LevelVersion;
use crate::model::{ListKind, SedDocument, SedElement};
use crate::xml::read_sedml_from_string;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Wrap a body snippet in a `<sedML>` root for the given pair.
pub fn wrap_in_document(level_version: LevelVersion, body: &str) -> String {
    format!(
        "<sedML xmlns=\"{}\" level=\"{}\" version=\"{}\">\n{}\n</sedML>",
        level_version.namespace_uri().unwrap_or_default(),
        level_version.level,
        level_version.version,
        body
    )
}

/// Read a wrapped snippet, asserting the reader logged nothing.
pub fn parse_clean(level_version: LevelVersion, body: &str) -> SedDocument {
    init_logging();
    let doc = read_sedml_from_string(&wrap_in_document(level_version, body));
    assert!(doc.error_log().is_empty(), "unexpected log:\n{}", doc.error_log());
    doc
}

/// The first item of a top-level list after reading a wrapped snippet.
pub fn parse_first(level_version: LevelVersion, list: ListKind, body: &str) -> SedElement {
    let doc = parse_clean(level_version, body);
    doc.list(list)
        .and_then(|l| l.get(0))
        .cloned()
        .unwrap_or_else(|| panic!("no items in <{}>", list.tag()))
}
