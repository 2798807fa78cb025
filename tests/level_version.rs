use anyhow::Result;
use pretty_assertions::assert_eq;
use sedml::core::level_version::{SEDML_L1V1_NAMESPACE, SEDML_L1V3_NAMESPACE};
use sedml::{
    ChildKind, ElementKind, ErrorCode, LevelVersion, ListKind, OperationError, SedDocument,
    SedElement, read_sedml_from_string, write_sedml_to_string,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_namespace_per_level_version() {
    assert_eq!(LevelVersion::L1V1.namespace_uri(), Some(SEDML_L1V1_NAMESPACE));
    assert_eq!(
        LevelVersion::from_namespace(SEDML_L1V3_NAMESPACE),
        Some(LevelVersion::L1V3)
    );
    assert_eq!(LevelVersion::new(2, 1).namespace_uri(), None);
    assert!(!LevelVersion::new(1, 5).is_supported());
}

#[test]
fn test_algorithm_name_only_at_v4() -> Result<()> {
    let mut v4 = SedElement::new(ElementKind::Algorithm, LevelVersion::L1V4);
    v4.set_id("alg")?;
    v4.set_name("CVODE")?;
    assert_eq!(v4.id(), "alg");

    let mut v3 = SedElement::new(ElementKind::Algorithm, LevelVersion::L1V3);
    assert!(matches!(
        v3.set_id("alg"),
        Err(OperationError::UnexpectedAttribute { .. })
    ));
    assert!(!v3.is_set_id());
    Ok(())
}

#[test]
fn test_unset_is_allowed_at_any_level_version() -> Result<()> {
    let mut v1 = SedElement::new(ElementKind::Algorithm, LevelVersion::L1V1);
    v1.unset_id()?;
    v1.unset_name()?;
    assert!(!v1.is_set_name());
    Ok(())
}

#[test]
fn test_downgrade_keeps_values_but_writer_skips_them() -> Result<()> {
    init();
    let mut doc = SedDocument::new();
    let sim = doc.create(ElementKind::UniformTimeCourse)?;
    sim.set_id("utc")?;
    sim.set_initial_time(0.0)?;
    sim.set_output_start_time(0.0)?;
    sim.set_output_end_time(100.0)?;
    sim.set_number_of_steps(1000)?;
    let algorithm = sim.create_child(ChildKind::Algorithm)?;
    algorithm.set_kisao_id_number(19)?;
    assert_eq!(algorithm.name(), "CVODE");

    doc.set_version(3)?;
    assert_eq!(doc.level_version(), LevelVersion::L1V3);
    let algorithm = doc
        .simulation("utc")
        .and_then(|s| s.child(ChildKind::Algorithm))
        .unwrap();
    assert_eq!(algorithm.level_version(), LevelVersion::L1V3);
    assert_eq!(algorithm.name(), "CVODE");

    let xml = write_sedml_to_string(&doc)?;
    assert!(xml.contains(SEDML_L1V3_NAMESPACE));
    assert!(xml.contains("<algorithm kisaoID=\"KISAO:0000019\"/>"));
    assert!(!xml.contains("CVODE"));

    let reread = read_sedml_from_string(&xml);
    assert!(reread.error_log().is_empty(), "{}", reread.error_log());
    assert_eq!(reread.level_version(), LevelVersion::L1V3);
    Ok(())
}

#[test]
fn test_lists_follow_level_version() -> Result<()> {
    let mut v4 = SedDocument::new();
    assert!(v4.create(ElementKind::Style).is_ok());

    let mut v3 = SedDocument::with_level_version(LevelVersion::L1V3)?;
    assert!(matches!(
        v3.create(ElementKind::Style),
        Err(OperationError::UnexpectedElement { .. })
    ));
    assert_eq!(v3.styles().count(), 0);

    let mut v1 = SedDocument::with_level_version(LevelVersion::L1V1)?;
    assert!(v1.create(ElementKind::RepeatedTask).is_err());
    assert!(v1.create(ElementKind::Task).is_ok());
    Ok(())
}

#[test]
fn test_add_rejects_mismatched_level_version() -> Result<()> {
    let mut doc = SedDocument::with_level_version(LevelVersion::L1V2)?;
    let mut model = SedElement::new(ElementKind::Model, LevelVersion::L1V4);
    model.set_id("m")?;
    model.set_source("m.xml")?;
    assert!(matches!(
        doc.add(&model),
        Err(OperationError::LevelVersionMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_unsupported_level_version() {
    assert!(matches!(
        SedDocument::with_level_version(LevelVersion::new(1, 9)),
        Err(OperationError::UnsupportedLevelVersion(_))
    ));
    let mut doc = SedDocument::new();
    assert!(doc.set_level(2).is_err());
    assert_eq!(doc.level_version(), LevelVersion::L1V4);
}

#[test]
fn test_reader_reports_attribute_not_allowed() {
    init();
    let xml = format!(
        r#"<sedML xmlns="{}" level="1" version="3">
  <listOfOutputs>
    <plot2D id="p">
      <listOfCurves>
        <curve id="c" logX="false" logY="false" xDataReference="x" yDataReference="y" order="1"/>
      </listOfCurves>
    </plot2D>
  </listOfOutputs>
</sedML>"#,
        SEDML_L1V3_NAMESPACE
    );
    let doc = read_sedml_from_string(&xml);
    let errors: Vec<_> = doc
        .error_log()
        .with_code(ErrorCode::AttributeNotAllowed)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("order"));
    assert_eq!(errors[0].context.line, Some(5));

    let curve = doc
        .output("p")
        .and_then(|p| p.list(ListKind::Curves))
        .and_then(|l| l.get(0))
        .unwrap();
    assert!(!curve.is_set_order());
    assert_eq!(curve.x_data_reference(), "x");
}
