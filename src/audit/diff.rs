//! Diff generation for revision history
//!
//! Compares two flattened snapshots by leaf *value*, not by path. A leaf is
//! added when its value occurs nowhere in the old snapshot, and removed when
//! its value occurs nowhere in the new one. A value that moved to another
//! path, or that still exists under some other path, is not reported.

use std::collections::HashSet;

use serde_json::Value;

use super::entry::ChangePayload;
use super::flatten::{FlatSnapshot, Flattener};

/// Canonical string form used to compare leaf values
///
/// Null and false both become the empty string, true becomes "1", and
/// integral numbers compare equal whether stored as integer or float.
pub fn canonical_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => {
            if n.is_f64() {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                        format!("{}", f as i64)
                    }
                    _ => n.to_string(),
                }
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s.clone(),
        // composites never reach a flat snapshot except when empty
        other => other.to_string(),
    }
}

/// Compute `(added, removed)` between two flat snapshots
pub fn diff(new: &FlatSnapshot, old: &FlatSnapshot) -> (FlatSnapshot, FlatSnapshot) {
    (missing_from(new, old), missing_from(old, new))
}

/// Entries of `source` whose value does not occur anywhere in `other`
fn missing_from(source: &FlatSnapshot, other: &FlatSnapshot) -> FlatSnapshot {
    let present: HashSet<String> = other.values().map(canonical_scalar).collect();

    source
        .iter()
        .filter(|(_, value)| !present.contains(&canonical_scalar(value)))
        .map(|(path, value)| (path.clone(), value.clone()))
        .collect()
}

/// Build the nested `{added, removed}` payload between two nested records
pub fn generate_diff(new: &Value, old: &Value, flattener: &Flattener) -> ChangePayload {
    let (added, removed) = diff(&flattener.flatten(new), &flattener.flatten(old));

    ChangePayload {
        added: Some(flattener.unflatten(&added)),
        removed: Some(flattener.unflatten(&removed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(value: Value) -> FlatSnapshot {
        Flattener::default().flatten(&value)
    }

    #[test]
    fn test_identical_snapshots() {
        let snapshot = flat(json!({"a": 1, "b": {"c": [true, "x"]}}));
        let (added, removed) = diff(&snapshot, &snapshot);
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn test_swapped_values_are_unchanged() {
        let old = flat(json!({"a": "x", "b": "y"}));
        let new = flat(json!({"a": "y", "b": "x"}));
        let (added, removed) = diff(&new, &old);
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn test_scalar_change() {
        let payload = generate_diff(
            &json!({"status": "published"}),
            &json!({"status": "draft"}),
            &Flattener::default(),
        );
        assert_eq!(payload.added, Some(json!({"status": "published"})));
        assert_eq!(payload.removed, Some(json!({"status": "draft"})));
    }

    #[test]
    fn test_nested_additions() {
        let old = json!({
            "details": {
                "tags": ["core", "legacy"],
                "meta": {"created": "2023-01-01"}
            }
        });
        let new = json!({
            "details": {
                "tags": ["core", "legacy", "extra"],
                "meta": {"created": "2023-01-01", "updated": "2024-02-02"}
            },
            "extra": {"notes": "Added later"}
        });

        let payload = generate_diff(&new, &old, &Flattener::default());
        assert_eq!(
            payload.added,
            Some(json!({
                "details": {
                    "tags": {"2": "extra"},
                    "meta": {"updated": "2024-02-02"}
                },
                "extra": {"notes": "Added later"}
            }))
        );
        assert_eq!(payload.removed, Some(json!({})));
    }

    #[test]
    fn test_nested_removals() {
        let old = json!({
            "details": {
                "tags": ["core", "legacy", "obsolete"],
                "meta": {"created": "2023-01-01", "removed": "2024-01-01"}
            }
        });
        let new = json!({
            "details": {
                "tags": ["core"],
                "meta": {"created": "2023-01-01"}
            }
        });

        let payload = generate_diff(&new, &old, &Flattener::default());
        assert_eq!(payload.added, Some(json!({})));
        assert_eq!(
            payload.removed,
            Some(json!({
                "details": {
                    "tags": {"1": "legacy", "2": "obsolete"},
                    "meta": {"removed": "2024-01-01"}
                }
            }))
        );
    }

    #[test]
    fn test_shared_value_masks_change() {
        // "draft" still exists under another path, so the status change is hidden
        let old = flat(json!({"status": "draft", "label": "x"}));
        let new = flat(json!({"status": "x", "label": "draft"}));
        let (added, removed) = diff(&new, &old);
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn test_canonical_scalar() {
        assert_eq!(canonical_scalar(&json!(null)), "");
        assert_eq!(canonical_scalar(&json!(false)), "");
        assert_eq!(canonical_scalar(&json!(true)), "1");
        assert_eq!(canonical_scalar(&json!(42)), "42");
        assert_eq!(canonical_scalar(&json!(42.0)), "42");
        assert_eq!(canonical_scalar(&json!(1.5)), "1.5");
        assert_eq!(canonical_scalar(&json!("1")), "1");
    }

    #[test]
    fn test_loose_equality_across_types() {
        // 1, 1.0, "1" and true all compare equal
        let old = flat(json!({"a": 1}));
        let new = flat(json!({"a": "1", "b": true, "c": 1.0}));
        let (added, removed) = diff(&new, &old);
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }
}
