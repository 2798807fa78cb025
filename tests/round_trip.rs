//! Round-trip tests for SED-ML reading and writing.
//!
//! These tests verify that documents can be read, written back to XML and
//! read again while keeping the same tree, and that writing is idempotent.

use anyhow::Result;
use pretty_assertions::assert_eq;
use sedml::xml::write_sedml_to_string_with_options;
use sedml::{
    ElementKind, LevelVersion, ListKind, SedDocument, WriteOptions, read_sedml,
    read_sedml_from_string, write_sedml, write_sedml_to_string, write_sedml_with_options,
};

const SORT_CURVES: &str = include_str!("data/sort_curves.sedml");
const REPEATED_SCAN: &str = include_str!("data/repeated_scan_l1v3.sedml");

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to perform a round-trip: read → write → read → write → compare
fn round_trip_test(xml: &str, description: &str) -> SedDocument {
    init();
    let doc1 = read_sedml_from_string(xml);
    assert!(
        doc1.error_log().is_empty(),
        "reading {} logged:\n{}",
        description,
        doc1.error_log()
    );

    let written1 = write_sedml_to_string(&doc1)
        .unwrap_or_else(|e| panic!("Failed to write {}: {:?}", description, e));
    let doc2 = read_sedml_from_string(&written1);
    assert!(doc2.error_log().is_empty(), "{}", doc2.error_log());
    let written2 = write_sedml_to_string(&doc2)
        .unwrap_or_else(|e| panic!("Failed to rewrite {}: {:?}", description, e));

    assert_eq!(written1, written2, "writing is not idempotent for {}", description);
    assert_eq!(doc1, doc2, "round-trip changed the tree for {}", description);
    doc2
}

#[test]
fn test_round_trip_sort_curves() {
    let doc = round_trip_test(SORT_CURVES, "sort_curves");
    assert_eq!(doc.styles().count(), 3);
    assert_eq!(doc.style("green_line").unwrap().base_style(), "red_line");
}

#[test]
fn test_round_trip_repeated_scan() {
    let doc = round_trip_test(REPEATED_SCAN, "repeated scan");
    assert_eq!(doc.level_version(), LevelVersion::L1V3);
    assert_eq!(doc.namespaces().len(), 1);
    assert!(doc.root().is_set_notes());

    let model = doc.model("model1").unwrap();
    let changes = model.list(ListKind::ModelChanges).unwrap();
    let kinds: Vec<_> = changes.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        [ElementKind::ChangeAttribute, ElementKind::AddXml, ElementKind::ComputeChange]
    );
    assert!(changes.get(1).unwrap().is_set_payload());
    let compute = changes.get(2).unwrap();
    assert_eq!(
        compute.math().unwrap().identifiers().into_iter().collect::<Vec<_>>(),
        ["factor", "k1"]
    );

    let scan = doc.task("scan").unwrap();
    assert!(scan.reset_model());
    let vector = scan.list(ListKind::Ranges).unwrap().get_by_id("extra").unwrap();
    assert_eq!(vector.values(), [1.0, 4.0, 9.0]);
}

#[test]
fn test_round_trip_built_document() -> Result<()> {
    init();
    let mut doc = SedDocument::new();
    doc.root_mut().set_id("experiment")?;

    let model = doc.create(ElementKind::Model)?;
    model.set_id("m")?;
    model.set_source("model.cellml")?;
    model.set_language("urn:sedml:language:cellml")?;

    let sim = doc.create(ElementKind::OneStep)?;
    sim.set_id("step")?;
    sim.set_step(0.25)?;
    sim.create_child(sedml::ChildKind::Algorithm)?
        .set_kisao_id_number(30)?;

    let plot = doc.create(ElementKind::Plot3D)?;
    plot.set_id("p3")?;
    let surface = plot.create(ElementKind::Surface)?;
    surface.set_id("surf")?;
    surface.set_type("heatMap")?;
    surface.set_x_data_reference("x")?;
    surface.set_y_data_reference("y")?;
    surface.set_z_data_reference("z")?;
    let axis = plot.create_child(sedml::ChildKind::ZAxis)?;
    axis.set_type("log10")?;
    axis.set_min(1e-6)?;
    axis.set_grid(true)?;

    let written = write_sedml_to_string(&doc)?;
    let reread = read_sedml_from_string(&written);
    assert!(reread.error_log().is_empty(), "{}", reread.error_log());
    assert_eq!(reread, doc);
    assert_eq!(write_sedml_to_string(&reread)?, written);

    let algorithm = reread
        .simulation("step")
        .and_then(|s| s.child(sedml::ChildKind::Algorithm))
        .unwrap();
    assert_eq!(algorithm.name(), "Euler forward method");
    Ok(())
}

#[test]
fn test_round_trip_through_file() -> Result<()> {
    init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scan.sedml");

    let doc = read_sedml_from_string(REPEATED_SCAN);
    write_sedml(&doc, &path)?;
    let reread = read_sedml(&path);
    assert!(reread.error_log().is_empty(), "{}", reread.error_log());
    assert_eq!(reread, doc);

    let compact = dir.path().join("compact.sedml");
    write_sedml_with_options(&doc, &compact, WriteOptions::compact())?;
    let text = std::fs::read_to_string(&compact)?;
    assert!(text.starts_with("<sedML "));
    assert_eq!(text.lines().count(), 1);
    assert_eq!(read_sedml(&compact), doc);
    Ok(())
}

#[test]
fn test_unset_round_trip() -> Result<()> {
    init();
    let mut doc = read_sedml_from_string(SORT_CURVES);
    let curve = doc
        .list_mut(ListKind::Outputs)
        .and_then(|l| l.get_by_id_mut("plot1"))
        .and_then(|p| p.list_mut(ListKind::Curves))
        .and_then(|l| l.get_by_id_mut("curve1"))
        .unwrap();
    curve.unset_style()?;
    curve.unset_order()?;

    let reread = read_sedml_from_string(&write_sedml_to_string(&doc)?);
    let curve = reread
        .output("plot1")
        .and_then(|p| p.list(ListKind::Curves))
        .and_then(|l| l.get_by_id("curve1"))
        .unwrap();
    assert!(!curve.is_set_style());
    assert!(!curve.is_set_order());
    assert_eq!(curve.style(), "");
    assert_eq!(curve.order(), 0);
    Ok(())
}

#[test]
fn test_namespaces_declared_below_root_are_kept() -> Result<()> {
    init();
    let xml = r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="m1" source="m.xml" xmlns:sbml="http://www.sbml.org/sbml/level3/version1/core">
      <listOfChanges xmlns:cellml="http://www.cellml.org/cellml/1.1#">
        <addXML target="/sbml:sbml/sbml:model/sbml:listOfParameters">
          <newXML>
            <sbml:parameter id="k" value="1"/>
          </newXML>
        </addXML>
        <addXML target="/cellml:model">
          <newXML xmlns:math="http://www.w3.org/1998/Math/MathML">
            <math:math/>
          </newXML>
        </addXML>
      </listOfChanges>
    </model>
  </listOfModels>
</sedML>"#;
    let doc = round_trip_test(xml, "nested namespace declarations");
    let model = doc.model("m1").unwrap();
    assert_eq!(
        model.namespaces(),
        [
            (
                "sbml".to_string(),
                "http://www.sbml.org/sbml/level3/version1/core".to_string()
            ),
            ("cellml".to_string(), "http://www.cellml.org/cellml/1.1#".to_string()),
        ]
    );
    assert!(doc.namespaces().is_empty());
    let wrapped = model.list(ListKind::ModelChanges).and_then(|l| l.get(1)).unwrap();
    assert_eq!(wrapped.namespaces()[0].0, "math");

    let compact = write_sedml_to_string_with_options(&doc, WriteOptions::compact())?;
    assert!(
        compact.contains(r#"<model xmlns:sbml="http://www.sbml.org/sbml/level3/version1/core" xmlns:cellml="http://www.cellml.org/cellml/1.1#" id="m1" source="m.xml">"#),
        "{}",
        compact
    );
    assert!(compact.contains(r#"<newXML><sbml:parameter id="k" value="1"/></newXML>"#));
    Ok(())
}

#[test]
fn test_notes_keep_mixed_content_whitespace() -> Result<()> {
    init();
    let xml = r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <notes>
    <p xmlns="http://www.w3.org/1999/xhtml">Hello <b>big</b> world</p>
  </notes>
  <listOfModels>
    <model id="m1" source="m.xml">
      <annotation>
        <info xmlns="urn:example">a <em>b</em> <em>c</em></info>
      </annotation>
    </model>
  </listOfModels>
</sedML>"#;
    let doc = round_trip_test(xml, "mixed content");
    assert_eq!(doc.root().notes().unwrap().text_content(), "Hello big world");

    let compact = write_sedml_to_string_with_options(&doc, WriteOptions::compact())?;
    assert!(
        compact.contains(
            r#"<notes><p xmlns="http://www.w3.org/1999/xhtml">Hello <b>big</b> world</p></notes>"#
        ),
        "{}",
        compact
    );
    assert!(compact.contains(r#"<info xmlns="urn:example">a <em>b</em> <em>c</em></info>"#));

    let pretty = write_sedml_to_string(&doc)?;
    assert!(pretty.contains("Hello <b>big</b> world</p>"), "{}", pretty);
    Ok(())
}
