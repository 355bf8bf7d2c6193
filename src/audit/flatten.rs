//! Flattening of nested records into path/leaf maps
//!
//! `{"details": {"tags": ["a", "b"]}}` flattens to
//! `{"details.tags.0": "a", "details.tags.1": "b"}` and back.
//!
//! Empty maps and sequences produce no leaf, so they do not survive a round
//! trip. Keys that contain the separator are split apart on unflatten, and a
//! map whose keys happen to be `"0".."n-1"` comes back as a sequence.

use serde_json::{Map, Value};

use crate::error::{HistoryError, HistoryResult};

/// Path to leaf-value mapping, in depth-first insertion order
pub type FlatSnapshot = Map<String, Value>;

/// Default path separator
pub const DEFAULT_SEPARATOR: &str = ".";

/// Converts between nested values and flat snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattener {
    separator: String,
}

impl Default for Flattener {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl Flattener {
    /// Create a flattener joining path segments with `separator`
    pub fn new(separator: impl Into<String>) -> HistoryResult<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(HistoryError::Config(
                "Path separator cannot be empty".into(),
            ));
        }
        Ok(Self { separator })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Flatten a nested value into a path/leaf map
    pub fn flatten(&self, value: &Value) -> FlatSnapshot {
        let mut out = FlatSnapshot::new();
        self.flatten_into(value, "", &mut out);
        out
    }

    fn flatten_into(&self, value: &Value, prefix: &str, out: &mut FlatSnapshot) {
        match value {
            Value::Object(fields) => {
                for (key, child) in fields {
                    self.flatten_into(child, &self.join(prefix, key), out);
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.flatten_into(child, &self.join(prefix, &index.to_string()), out);
                }
            }
            leaf => {
                out.insert(prefix.to_string(), leaf.clone());
            }
        }
    }

    fn join(&self, prefix: &str, segment: &str) -> String {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{}{}{}", prefix, self.separator, segment)
        }
    }

    /// Rebuild the nested value described by a flat snapshot
    ///
    /// Index positions are kept as they are: a sequence that only has index
    /// 2 comes back as `{"2": ...}`, never as a one-element sequence.
    pub fn unflatten(&self, snapshot: &FlatSnapshot) -> Value {
        let mut root = Map::new();

        'paths: for (path, leaf) in snapshot {
            let segments: Vec<&str> = path.split(self.separator.as_str()).collect();
            let Some((last, parents)) = segments.split_last() else {
                continue;
            };

            let mut node = &mut root;
            for segment in parents {
                let slot = node
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                let Value::Object(child) = slot else {
                    continue 'paths;
                };
                node = child;
            }
            node.insert(last.to_string(), leaf.clone());
        }

        restore_sequences(Value::Object(root))
    }
}

/// Turn every non-empty map keyed exactly `"0".."n-1"` (in order) into a sequence
fn restore_sequences(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let dense = !fields.is_empty()
                && fields
                    .keys()
                    .enumerate()
                    .all(|(index, key)| *key == index.to_string());

            let children = fields
                .into_iter()
                .map(|(key, child)| (key, restore_sequences(child)));

            if dense {
                Value::Array(children.map(|(_, child)| child).collect())
            } else {
                Value::Object(children.collect())
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let value = json!({
            "details": {
                "tags": ["core", "legacy"],
                "meta": {"created": "2023-01-01"}
            },
            "status": "draft"
        });

        let flat = Flattener::default().flatten(&value);
        let paths: Vec<_> = flat.keys().cloned().collect();
        assert_eq!(
            paths,
            vec![
                "details.tags.0",
                "details.tags.1",
                "details.meta.created",
                "status"
            ]
        );
        assert_eq!(flat["details.tags.1"], json!("legacy"));
    }

    #[test]
    fn test_flatten_drops_empty_composites() {
        let value = json!({"payload": {}, "tags": [], "title": ""});
        let flat = Flattener::default().flatten(&value);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["title"], json!(""));
    }

    #[test]
    fn test_round_trip() {
        let value = json!({
            "id": 7,
            "details": {
                "tags": ["core", "legacy", "extra"],
                "meta": {"created": "2023-01-01", "flags": [true, null, 1.5]}
            },
            "matrix": [[1, 2], [3]]
        });
        let flattener = Flattener::default();
        assert_eq!(flattener.unflatten(&flattener.flatten(&value)), value);
    }

    #[test]
    fn test_unflatten_keeps_sparse_indices() {
        let mut flat = FlatSnapshot::new();
        flat.insert("details.tags.2".into(), json!("extra"));

        let nested = Flattener::default().unflatten(&flat);
        assert_eq!(nested, json!({"details": {"tags": {"2": "extra"}}}));
    }

    #[test]
    fn test_unflatten_out_of_order_indices_stay_keyed() {
        let mut flat = FlatSnapshot::new();
        flat.insert("tags.1".into(), json!("b"));
        flat.insert("tags.0".into(), json!("a"));

        let nested = Flattener::default().unflatten(&flat);
        assert_eq!(nested, json!({"tags": {"1": "b", "0": "a"}}));
    }

    #[test]
    fn test_unflatten_empty_snapshot() {
        let nested = Flattener::default().unflatten(&FlatSnapshot::new());
        assert_eq!(nested, json!({}));
    }

    #[test]
    fn test_custom_separator() {
        let flattener = Flattener::new("/").unwrap();
        let value = json!({"a": {"b.c": 1}});
        let flat = flattener.flatten(&value);
        assert!(flat.contains_key("a/b.c"));
        assert_eq!(flattener.unflatten(&flat), value);
    }

    #[test]
    fn test_empty_separator_rejected() {
        assert!(matches!(
            Flattener::new(""),
            Err(HistoryError::Config(_))
        ));
    }
}
