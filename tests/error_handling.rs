use std::io::Write;

use anyhow::Result;
use pretty_assertions::assert_eq;
use sedml::xml::ErrorContext;
use sedml::{
    ElementKind, ErrorCode, SedDocument, SedError, Severity, read_sedml, read_sedml_from_string,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_error_context_display() {
    let context = ErrorContext::at(42, 7)
        .with_file(Some("sim.sedml"))
        .with_parsing("<curve>");

    let error_msg = format!("{}", context);
    assert!(error_msg.contains("sim.sedml"));
    assert!(error_msg.contains("line 42, column 7"));
    assert!(error_msg.contains("<curve>"));
    assert_eq!(format!("{}", ErrorContext::new()), "");
}

#[test]
fn test_sed_error_display() {
    let error = SedError::new(
        ErrorCode::DuplicateId,
        Severity::Error,
        "id 'm1' is used more than once",
    )
    .with_context(ErrorContext::at(3, 5));
    let text = error.to_string();
    assert!(text.starts_with("error: id 'm1'"), "{}", text);
    assert!(text.ends_with("at line 3, column 5"), "{}", text);
}

#[test]
fn test_reader_never_fails() {
    init();
    let inputs = [
        "",
        "not xml at all",
        "<sedML",
        "<other/>",
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4"><listOfModels>"#,
    ];
    for input in inputs {
        let doc = read_sedml_from_string(input);
        assert!(
            doc.error_log().has_errors(),
            "no error logged for {:?}",
            input
        );
    }
}

#[test]
fn test_truncated_document_is_fatal() {
    init();
    let doc = read_sedml_from_string(
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="m1" source="a.xml"/>"#,
    );
    assert_eq!(doc.num_errors(Severity::Fatal), 1);
    assert_eq!(doc.error_log().with_code(ErrorCode::NotWellFormed).count(), 1);
}

#[test]
fn test_reader_errors_carry_file_path() -> Result<()> {
    init();
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="m1" source="a.xml" colour="blue"/>
  </listOfModels>
</sedML>"#
    )?;
    file.flush()?;

    let doc = read_sedml(file.path());
    assert_eq!(doc.error_log().len(), 1);
    let warning = &doc.error_log().errors()[0];
    assert_eq!(warning.code, ErrorCode::UnknownAttribute);
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.context.file_path.as_deref(), Some(file.path()));
    assert_eq!(warning.context.line, Some(3));
    assert!(warning.to_string().contains("colour"));

    assert_eq!(doc.model("m1").map(|m| m.source()), Some("a.xml"));
    Ok(())
}

#[test]
fn test_missing_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let doc = read_sedml(dir.path().join("nope.sedml"));
    assert_eq!(doc.error_log().len(), 1);
    assert_eq!(doc.error_log().errors()[0].code, ErrorCode::Io);
    assert_eq!(doc.num_errors(Severity::Fatal), 1);
    assert_eq!(doc.models().count(), 0);
}

#[test]
fn test_error_log_display_and_clear() {
    init();
    let mut doc = read_sedml_from_string(
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="m1"/>
    <model id="m1" source="b.xml"/>
  </listOfModels>
</sedML>"#,
    );
    let codes: Vec<_> = doc.error_log().iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        [ErrorCode::MissingRequiredAttribute, ErrorCode::DuplicateId]
    );

    let shown = doc.error_log().to_string();
    assert!(shown.contains("  1. error:"), "{}", shown);
    assert!(shown.contains("  2. error:"), "{}", shown);
    assert_eq!(shown.lines().count(), 2);

    doc.error_log_mut().clear();
    assert!(doc.error_log().is_empty());
}

#[test]
fn test_check_consistency_on_built_document() -> Result<()> {
    init();
    let mut doc = SedDocument::new();
    let task = doc.create(ElementKind::Task)?;
    task.set_id("t1")?;
    task.set_model_reference("nowhere")?;
    task.set_simulation_reference("never")?;

    let found = doc.check_consistency();
    assert_eq!(found, 2);
    assert_eq!(doc.num_errors(Severity::Error), 2);
    let messages: Vec<_> = doc
        .error_log()
        .with_code(ErrorCode::DanglingReference)
        .map(|e| e.message.clone())
        .collect();
    assert!(messages[0].contains("nowhere"), "{:?}", messages);
    assert!(messages[1].contains("never"), "{:?}", messages);

    let model = doc.create(ElementKind::Model)?;
    model.set_id("nowhere")?;
    model.set_source("m.xml")?;
    let sim = doc.create(ElementKind::OneStep)?;
    sim.set_id("never")?;
    sim.set_step(1.0)?;
    sim.create_child(sedml::ChildKind::Algorithm)?
        .set_kisao_id_number(19)?;

    doc.error_log_mut().clear();
    assert_eq!(doc.check_consistency(), 0, "{}", doc.error_log());
    Ok(())
}
