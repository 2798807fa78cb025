//! KiSAO term lookup.
//!
//! Setting a `kisaoID` on an algorithm (or algorithm parameter) fills in a
//! human-readable `name` when none is set. The mapping lives in an immutable
//! [`KisaoTerms`] table that callers pass explicitly, or in the builtin table
//! returned by [`KisaoTerms::builtin`], which is built once on first use.
//!
//! The builtin table covers the integrators, stochastic methods and
//! parameters that SED-ML files most often name. It is not the whole
//! ontology: any other valid term is accepted as a `kisaoID` but leaves
//! `name` unset. Callers that need more labels load them with
//! [`KisaoTerms::from_xml_str`] and layer them over the builtin table with
//! [`KisaoTerms::merged_with`].
//!
//! Tables can also be loaded from XML:
//!
//! ```xml
//! <kisaoTerms>
//!   <term id="KISAO:0000019" name="CVODE"/>
//!   <term id="64" name="Runge-Kutta based method"/>
//! </kisaoTerms>
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::core::identifiers::{parse_digits, parse_kisao_id};

const BUILTIN_TERMS: &[(u32, &str)] = &[
    (0, "modelling and simulation algorithm"),
    (19, "CVODE"),
    (20, "PVODE"),
    (27, "Gibson-Bruck next reaction algorithm"),
    (29, "Gillespie direct algorithm"),
    (30, "Euler forward method"),
    (32, "explicit fourth-order Runge-Kutta method"),
    (33, "Rosenbrock method"),
    (39, "tau-leaping method"),
    (64, "Runge-Kutta based method"),
    (86, "Fehlberg method"),
    (87, "Dormand-Prince method"),
    (88, "LSODA"),
    (94, "Livermore solver"),
    (209, "relative tolerance"),
    (211, "absolute tolerance"),
    (241, "Gillespie-like method"),
    (280, "Adams-Moulton method"),
    (283, "IDA"),
    (288, "backward differentiation formula"),
    (415, "maximum number of steps"),
    (437, "flux balance analysis"),
    (467, "maximum time step"),
    (488, "seed"),
];

#[derive(Debug, Error)]
pub enum KisaoError {
    #[error("failed to read KiSAO term table: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("invalid KiSAO term id '{0}'")]
    InvalidTerm(String),
}

#[derive(Debug, Deserialize)]
struct TermTable {
    #[serde(rename = "term", default)]
    terms: Vec<TermEntry>,
}

#[derive(Debug, Deserialize)]
struct TermEntry {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
}

/// An immutable map from KiSAO term number to its label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KisaoTerms {
    names: BTreeMap<u32, String>,
}

impl KisaoTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// The partial table shipped with the crate; initialised on first call.
    pub fn builtin() -> &'static KisaoTerms {
        static BUILTIN: OnceLock<KisaoTerms> = OnceLock::new();
        BUILTIN.get_or_init(|| BUILTIN_TERMS.iter().map(|(id, name)| (*id, *name)).collect())
    }

    /// Load a table from its XML form; term ids may be `KISAO:nnnnnnn` or bare numbers.
    pub fn from_xml_str(xml: &str) -> Result<Self, KisaoError> {
        let table: TermTable = quick_xml::de::from_str(xml)?;
        let mut names = BTreeMap::new();
        for entry in table.terms {
            let term = parse_kisao_id(&entry.id)
                .ok()
                .or_else(|| parse_digits(entry.id.trim()))
                .ok_or_else(|| KisaoError::InvalidTerm(entry.id.clone()))?;
            names.insert(term, entry.name);
        }
        Ok(Self { names })
    }

    /// A copy of this table with `other`'s entries layered on top.
    pub fn merged_with(&self, other: &KisaoTerms) -> KisaoTerms {
        let mut names = self.names.clone();
        names.extend(other.names.iter().map(|(k, v)| (*k, v.clone())));
        KisaoTerms { names }
    }

    pub fn name(&self, term: u32) -> Option<&str> {
        self.names.get(&term).map(String::as_str)
    }

    /// Look up by the textual `KISAO:nnnnnnn` form.
    pub fn name_for_id(&self, kisao_id: &str) -> Option<&str> {
        parse_kisao_id(kisao_id).ok().and_then(|term| self.name(term))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for KisaoTerms {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        KisaoTerms {
            names: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let terms = KisaoTerms::builtin();
        assert_eq!(terms.name(64), Some("Runge-Kutta based method"));
        assert_eq!(terms.name_for_id("KISAO:0000019"), Some("CVODE"));
        assert_eq!(terms.name(999_999), None);
        assert!(std::ptr::eq(terms, KisaoTerms::builtin()));
    }

    #[test]
    fn test_from_xml() {
        let xml = r#"<kisaoTerms>
            <term id="KISAO:0000019" name="custom CVODE"/>
            <term id="1234" name="in-house solver"/>
        </kisaoTerms>"#;
        let terms = KisaoTerms::from_xml_str(xml).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms.name(19), Some("custom CVODE"));
        assert_eq!(terms.name(1234), Some("in-house solver"));

        let merged = KisaoTerms::builtin().merged_with(&terms);
        assert_eq!(merged.name(19), Some("custom CVODE"));
        assert_eq!(merged.name(64), Some("Runge-Kutta based method"));
    }

    #[test]
    fn test_from_xml_rejects_bad_id() {
        let xml = r#"<kisaoTerms><term id="not-a-term" name="x"/></kisaoTerms>"#;
        assert!(matches!(
            KisaoTerms::from_xml_str(xml),
            Err(KisaoError::InvalidTerm(_))
        ));
    }
}
