//! Typed attribute storage with an explicit is-set state.
//!
//! An attribute that was never assigned is absent from the table, so a stored
//! `0` or `false` stays distinguishable from "not set".

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::identifiers::{check_color, check_metaid, check_sid, parse_kisao_id};
use crate::model::schema::AttrType;

/// A stored attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Int(i32),
    Double(f64),
    Bool(bool),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttrValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The lexical form written to XML.
    pub fn to_xml_string(&self) -> String {
        match self {
            AttrValue::Str(s) => s.clone(),
            AttrValue::Int(i) => i.to_string(),
            AttrValue::Double(d) => format_double(*d),
            AttrValue::Bool(b) => b.to_string(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Str(_) => "string",
            AttrValue::Int(_) => "integer",
            AttrValue::Double(_) => "double",
            AttrValue::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Double(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Format a double the way SED-ML (XML Schema `double`) spells it.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{}", value)
    }
}

pub fn parse_double(text: &str) -> Option<f64> {
    let text = text.trim();
    match text.to_ascii_lowercase().as_str() {
        "inf" | "+inf" | "infinity" | "+infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        "nan" => Some(f64::NAN),
        _ => text.parse::<f64>().ok(),
    }
}

pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Convert lexical text to a value of the given type.
///
/// Only the value space is checked here (is it a number, a boolean, ...);
/// identifier syntax is checked separately by [`check_syntax`].
pub fn coerce(ty: AttrType, text: &str) -> Result<AttrValue, String> {
    match ty {
        AttrType::Int => text
            .trim()
            .parse::<i32>()
            .map(AttrValue::Int)
            .map_err(|e| format!("expected an integer: {}", e)),
        AttrType::Double => parse_double(text)
            .map(AttrValue::Double)
            .ok_or_else(|| "expected a double".to_string()),
        AttrType::Bool => parse_bool(text)
            .map(AttrValue::Bool)
            .ok_or_else(|| "expected true or false".to_string()),
        _ => Ok(AttrValue::Str(text.to_string())),
    }
}

/// Check that `value` has the right type for `ty` and satisfies its syntax.
pub fn check_syntax(ty: AttrType, value: &AttrValue) -> Result<(), String> {
    match (ty, value) {
        (AttrType::Int, AttrValue::Int(_))
        | (AttrType::Double, AttrValue::Double(_))
        | (AttrType::Bool, AttrValue::Bool(_))
        | (AttrType::String, AttrValue::Str(_)) => Ok(()),
        (AttrType::SId | AttrType::SIdRef, AttrValue::Str(s)) => {
            check_sid(s).map_err(|e| e.to_string())
        }
        (AttrType::MetaId, AttrValue::Str(s)) => check_metaid(s).map_err(|e| e.to_string()),
        (AttrType::Kisao, AttrValue::Str(s)) => {
            parse_kisao_id(s).map(|_| ()).map_err(|e| e.to_string())
        }
        (AttrType::Color, AttrValue::Str(s)) => check_color(s).map_err(|e| e.to_string()),
        (AttrType::Enum(allowed), AttrValue::Str(s)) => {
            if allowed.contains(&s.as_str()) {
                Ok(())
            } else {
                Err(format!("expected one of: {}", allowed.join(", ")))
            }
        }
        (ty, value) => Err(format!(
            "expected a {} value, got a {}",
            ty.describe(),
            value.type_name()
        )),
    }
}

/// The attribute values of one element, keyed by XML attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    values: BTreeMap<&'static str, AttrValue>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: AttrValue) {
        self.values.insert(name, value);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttrValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(10.0), "10");
        assert_eq!(format_double(0.25), "0.25");
        assert_eq!(format_double(f64::INFINITY), "INF");
        assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_double(f64::NAN), "NaN");
    }

    #[test]
    fn test_parse_double_specials() {
        assert_eq!(parse_double("INF"), Some(f64::INFINITY));
        assert_eq!(parse_double("-INF"), Some(f64::NEG_INFINITY));
        assert!(parse_double("NaN").unwrap().is_nan());
        assert_eq!(parse_double(" 1e3 "), Some(1000.0));
        assert_eq!(parse_double("ten"), None);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce(AttrType::Int, "3"), Ok(AttrValue::Int(3)));
        assert!(coerce(AttrType::Int, "3.5").is_err());
        assert_eq!(coerce(AttrType::Bool, "1"), Ok(AttrValue::Bool(true)));
        assert!(coerce(AttrType::Bool, "yes").is_err());
        assert_eq!(
            coerce(AttrType::SId, "1bad"),
            Ok(AttrValue::Str("1bad".to_string()))
        );
    }

    #[test]
    fn test_check_syntax() {
        assert!(check_syntax(AttrType::SId, &"ok_id".into()).is_ok());
        assert!(check_syntax(AttrType::SId, &"1bad".into()).is_err());
        assert!(check_syntax(AttrType::Double, &AttrValue::Int(1)).is_err());
        assert!(check_syntax(AttrType::Enum(&["linear", "log"]), &"log".into()).is_ok());
        assert!(check_syntax(AttrType::Enum(&["linear", "log"]), &"ln".into()).is_err());
        assert!(check_syntax(AttrType::Kisao, &"KISAO:0000019".into()).is_ok());
    }

    #[test]
    fn test_table_is_set_distinct_from_default() {
        let mut table = AttributeTable::new();
        assert!(!table.is_set("order"));
        table.insert("order", AttrValue::Int(0));
        assert!(table.is_set("order"));
        assert_eq!(table.get("order"), Some(&AttrValue::Int(0)));
        table.remove("order");
        assert!(table.is_empty());
    }
}
