use anyhow::Result;
use pretty_assertions::assert_eq;
use sedml::core::kisao::KisaoError;
use sedml::{ChildKind, ElementKind, KisaoTerms, LevelVersion, SedDocument, SedElement};

#[test]
fn test_builtin_terms() {
    let terms = KisaoTerms::builtin();
    assert!(!terms.is_empty());
    assert_eq!(terms.name(19), Some("CVODE"));
    assert_eq!(terms.name_for_id("KISAO:0000088"), Some("LSODA"));
    assert_eq!(terms.name_for_id("KISAO:88"), None);
    assert_eq!(terms.name(9_999_999), None);
    assert!(std::ptr::eq(terms, KisaoTerms::builtin()));
}

#[test]
fn test_algorithm_named_from_term() -> Result<()> {
    let mut doc = SedDocument::new();
    let sim = doc.create(ElementKind::SteadyState)?;
    sim.set_id("ss")?;
    let algorithm = sim.create_child(ChildKind::Algorithm)?;
    algorithm.set_kisao_id_number(64)?;
    assert_eq!(algorithm.kisao_id(), "KISAO:0000064");
    assert_eq!(algorithm.name(), "Runge-Kutta based method");

    let parameter = algorithm.create(ElementKind::AlgorithmParameter)?;
    parameter.set_kisao_id("KISAO:0000209")?;
    assert_eq!(parameter.name(), "relative tolerance");
    Ok(())
}

#[test]
fn test_terms_from_xml() -> Result<()> {
    let xml = r#"
    <kisaoTerms>
        <term id="KISAO:0000019" name="CVODE integrator"/>
        <term id="9000001" name="lab stepper"/>
    </kisaoTerms>
    "#;
    let loaded = KisaoTerms::from_xml_str(xml)?;
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.name(9_000_001), Some("lab stepper"));

    let merged = KisaoTerms::builtin().merged_with(&loaded);
    assert_eq!(merged.len(), KisaoTerms::builtin().len() + 1);
    assert_eq!(merged.name(19), Some("CVODE integrator"));
    assert_eq!(merged.name(64), Some("Runge-Kutta based method"));

    let mut algorithm = SedElement::new(ElementKind::Algorithm, LevelVersion::L1V4);
    algorithm.set_kisao_id_number_with(9_000_001, &merged)?;
    assert_eq!(algorithm.name(), "lab stepper");
    Ok(())
}

#[test]
fn test_term_outside_builtin_table_leaves_name_unset() -> Result<()> {
    assert_eq!(KisaoTerms::builtin().name(282), None);

    let mut algorithm = SedElement::new(ElementKind::Algorithm, LevelVersion::L1V4);
    algorithm.set_kisao_id_number(282)?;
    assert_eq!(algorithm.kisao_id(), "KISAO:0000282");
    assert!(!algorithm.is_set_name());

    let extra = KisaoTerms::from_xml_str(
        r#"<kisaoTerms><term id="KISAO:0000282" name="KINSOL"/></kisaoTerms>"#,
    )?;
    let terms = KisaoTerms::builtin().merged_with(&extra);
    let mut named = SedElement::new(ElementKind::Algorithm, LevelVersion::L1V4);
    named.set_kisao_id_number_with(282, &terms)?;
    assert_eq!(named.name(), "KINSOL");
    Ok(())
}

#[test]
fn test_terms_from_bad_xml() {
    let bad_id = r#"<kisaoTerms><term id="KISAO-19" name="x"/></kisaoTerms>"#;
    assert!(matches!(
        KisaoTerms::from_xml_str(bad_id),
        Err(KisaoError::InvalidTerm(id)) if id == "KISAO-19"
    ));

    let missing_name = r#"<kisaoTerms><term id="19"/></kisaoTerms>"#;
    assert!(matches!(
        KisaoTerms::from_xml_str(missing_name),
        Err(KisaoError::Xml(_))
    ));
}
