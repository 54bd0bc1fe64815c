//! # Object Utility
//!
//! Small predicates and merges shared by the normalizer, the HAL parser and
//! every route set. All of them work on [`serde_json::Value`] because option
//! bags and backend resources are loosely shaped JSON.

use crate::options::ParameterMap;
use serde_json::Value;
use std::cmp::Ordering;

/// Returns `true` for values with object semantics: JSON objects and arrays.
///
/// `null` and every scalar (string, number, boolean) are not objects. Arrays
/// count as objects so that callers can tell a scalar identifier apart from
/// anything structured.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Own fields of an object-like value. Array elements are keyed by their index
/// (`"0"`, `"1"`, ...); `null` and scalars have no fields.
pub fn fields_of(value: Value) -> ParameterMap {
    match value {
        Value::Object(fields) => fields,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => ParameterMap::new(),
    }
}

/// Returns `true` when a field is missing altogether.
///
/// A present `null` is *defined*; only absence is undefined.
pub fn is_undefined(value: Option<&Value>) -> bool {
    value.is_none()
}

/// Shallow, left-to-right merge of `sources` over `destination`.
///
/// Later keys overwrite earlier ones. The destination is left untouched and a
/// new map is returned.
pub fn merge<'a, I>(destination: &ParameterMap, sources: I) -> ParameterMap
where
    I: IntoIterator<Item = &'a ParameterMap>,
{
    let mut merged = destination.clone();
    for source in sources {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Three-way comparison of two optional JSON values.
///
/// Numbers compare numerically, strings lexicographically and booleans with
/// `false < true`. Values of different kinds order by kind (missing and
/// `null` first, then booleans, numbers, strings, arrays, objects) so that the
/// comparison stays a total order. Two arrays or two objects compare equal.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            }
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (a, b) => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Sorts `items` ascending by the value stored under `key`.
///
/// The sort is stable: items whose keys compare equal keep their input order.
pub fn order_by(mut items: Vec<Value>, key: &str) -> Vec<Value> {
    items.sort_by(|a, b| compare_values(a.get(key), b.get(key)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ParameterMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_is_object_mirrors_reference_semantics() {
        assert!(is_object(&json!({"id": 1})));
        assert!(is_object(&json!([1, 2])));
        assert!(!is_object(&Value::Null));
        assert!(!is_object(&json!("abc")));
        assert!(!is_object(&json!(42)));
        assert!(!is_object(&json!(false)));
    }

    #[test]
    fn test_is_undefined_distinguishes_null() {
        let fields = map(json!({"search": null}));
        assert!(!is_undefined(fields.get("search")));
        assert!(is_undefined(fields.get("page")));
    }

    #[test]
    fn test_fields_of_keys_array_elements_by_index() {
        assert_eq!(Value::Object(fields_of(json!(["x", 2]))), json!({"0": "x", "1": 2}));
        assert_eq!(Value::Object(fields_of(json!({"a": 1}))), json!({"a": 1}));
        assert!(fields_of(json!("scalar")).is_empty());
    }

    #[test]
    fn test_merge_is_pure_and_later_sources_win() {
        let destination = map(json!({"a": 1, "b": 1}));
        let first = map(json!({"b": 2, "c": 2}));
        let second = map(json!({"c": 3}));

        let merged = merge(&destination, [&first, &second]);

        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(Value::Object(destination), json!({"a": 1, "b": 1}));
    }

    #[test]
    fn test_order_by_sorts_numbers_and_strings() {
        let items = vec![json!({"n": 3}), json!({"n": 1}), json!({"n": 2})];
        let sorted = order_by(items, "n");
        assert_eq!(sorted, vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})]);

        let items = vec![json!({"name": "b"}), json!({"name": "a"})];
        let sorted = order_by(items, "name");
        assert_eq!(sorted[0], json!({"name": "a"}));
    }

    #[test]
    fn test_order_by_keeps_ties_in_input_order() {
        let items = vec![
            json!({"rank": 1, "tag": "first"}),
            json!({"rank": 0, "tag": "zero"}),
            json!({"rank": 1, "tag": "second"}),
            json!({"tag": "missing"}),
        ];

        let sorted = order_by(items, "rank");
        let tags: Vec<_> = sorted.iter().map(|item| item["tag"].clone()).collect();

        assert_eq!(
            tags,
            vec![json!("missing"), json!("zero"), json!("first"), json!("second")]
        );
    }

    #[test]
    fn test_compare_values_orders_mixed_kinds() {
        assert_eq!(compare_values(None, Some(&json!(1))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("1")), Some(&json!(1))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!([1])), Some(&json!([2]))), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!(2.5)), Some(&json!(10))), Ordering::Less);
    }
}
