//! JSON object merging and nested-key lookup

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Merge two JSON objects into a new one. Keys from `second` win, except when
/// both sides hold an array under the same key — those are concatenated.
///
/// Handing anything other than an object on either side is a precondition
/// failure and errors synchronously.
pub fn extend(first: &Value, second: &Value) -> Result<Value> {
    let left = first.as_object().ok_or(Error::NotAnObject("first"))?;
    let right = second.as_object().ok_or(Error::NotAnObject("second"))?;

    let mut merged = left.clone();
    for (key, value) in right {
        match (merged.get(key).and_then(Value::as_array), value.as_array()) {
            (Some(existing), Some(incoming)) => {
                let mut joined = existing.clone();
                joined.extend(incoming.iter().cloned());
                merged.insert(key.clone(), Value::Array(joined));
            }
            _ => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(Value::Object(merged))
}

/// Shallow-merge any number of JSON objects, last one wins. Non-object parts
/// contribute nothing.
pub fn merge(parts: &[Value]) -> Value {
    let mut merged = Map::new();
    for part in parts {
        if let Some(object) = part.as_object() {
            for (key, value) in object {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(merged)
}

/// Look up a nested value by a dot-separated path, e.g. `"data.ponyUrl"` or
/// `"a.b.0"`. Path segments index objects by key and arrays by numeric
/// position. Returns `None` when the path is missing or ends in `Null`.
pub fn pluck<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = source;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extend_combines_properties_of_both() {
        let merged = extend(&json!({"a": 1}), &json!({"b": 2})).unwrap();
        assert_eq!(merged, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn extend_second_wins_on_conflict() {
        let merged = extend(&json!({"a": 1, "b": 1}), &json!({"b": 2})).unwrap();
        assert_eq!(merged, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn extend_concatenates_arrays_under_the_same_key() {
        let merged = extend(&json!({"xs": [1, 2]}), &json!({"xs": [3]})).unwrap();
        assert_eq!(merged, json!({"xs": [1, 2, 3]}));
    }

    #[test]
    fn extend_replaces_array_with_scalar() {
        let merged = extend(&json!({"xs": [1, 2]}), &json!({"xs": 3})).unwrap();
        assert_eq!(merged, json!({"xs": 3}));
    }

    #[test]
    fn extend_rejects_non_object_arguments() {
        let err = extend(&json!([1, 2]), &json!({})).unwrap_err();
        assert!(err.to_string().contains("first"), "got: {err}");

        let err = extend(&json!({}), &json!("nope")).unwrap_err();
        assert!(err.to_string().contains("second"), "got: {err}");
    }

    #[test]
    fn extend_leaves_inputs_untouched() {
        let first = json!({"a": 1});
        let second = json!({"a": 2});
        let _ = extend(&first, &second).unwrap();
        assert_eq!(first, json!({"a": 1}));
        assert_eq!(second, json!({"a": 2}));
    }

    #[test]
    fn merge_last_object_wins() {
        let merged = merge(&[json!({"a": 1, "b": 1}), json!({"b": 2}), json!({"c": 3})]);
        assert_eq!(merged, json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn merge_skips_non_objects() {
        let merged = merge(&[json!({"a": 1}), json!(7), json!(null)]);
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn merge_of_nothing_is_empty_object() {
        assert_eq!(merge(&[]), json!({}));
    }

    #[test]
    fn pluck_walks_objects_and_arrays() {
        let source = json!({"a": {"b": [1, 2, 3]}});
        assert_eq!(pluck(&source, "a.b.0"), Some(&json!(1)));
        assert_eq!(pluck(&source, "a.b.2"), Some(&json!(3)));
    }

    #[test]
    fn pluck_missing_path_is_none() {
        let source = json!({"a": {"b": 1}});
        assert_eq!(pluck(&source, "a.c"), None);
        assert_eq!(pluck(&source, "a.b.c"), None);
        assert_eq!(pluck(&source, "a.b.5"), None);
    }

    #[test]
    fn pluck_null_leaf_counts_as_absent() {
        let source = json!({"a": null});
        assert_eq!(pluck(&source, "a"), None);
    }

    #[test]
    fn pluck_keeps_legitimate_empty_values() {
        // Unlike the falsy-check idiom, 0 / "" / false are real values here.
        let source = json!({"zero": 0, "empty": "", "no": false});
        assert_eq!(pluck(&source, "zero"), Some(&json!(0)));
        assert_eq!(pluck(&source, "empty"), Some(&json!("")));
        assert_eq!(pluck(&source, "no"), Some(&json!(false)));
    }
}
