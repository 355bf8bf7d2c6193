//! Schemaless record type
//!
//! Used for entity types that are only described in `config.json` and have no
//! Rust struct of their own.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::Record;
use crate::error::{HistoryError, HistoryResult};

/// A record held as an ordered JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a document from JSON text; the top level must be an object
    pub fn parse(text: &str) -> HistoryResult<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(HistoryError::Validation(format!(
                "Record must be a JSON object, got: {}",
                other
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Record for Document {
    fn to_nested(&self) -> HistoryResult<Value> {
        Ok(Value::Object(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object() {
        let doc = Document::parse(r#"{"id": 1, "title": "x"}"#).unwrap();
        assert_eq!(doc.get("title"), Some(&json!("x")));
        assert_eq!(doc.to_nested().unwrap(), json!({"id": 1, "title": "x"}));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = Document::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, HistoryError::Validation(_)));
    }

    #[test]
    fn test_template_is_empty() {
        assert_eq!(Document::template().to_nested().unwrap(), json!({}));
    }

    #[test]
    fn test_field_order_preserved() {
        let mut doc = Document::default();
        doc.set("zeta", json!(1));
        doc.set("alpha", json!(2));
        let keys: Vec<_> = doc.fields().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
