use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// Recursively flattens a parsed JSON document into a `dot.style` path map.
/// Arrays are indexed positionally; only leaves appear. Grounded on
/// `utils/FlattenUtil.go`, which delegates to a third-party Go flattener of
/// the same shape — hand-rolled here since no equivalent crate is in the
/// dependency stack (§4.6).
#[must_use]
pub fn flatten_json(value: &JsonValue) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    flatten_into(value, None, &mut out);
    out
}

fn flatten_into(value: &JsonValue, prefix: Option<&str>, out: &mut BTreeMap<String, String>) {
    match value {
        JsonValue::Object(map) => {
            if map.is_empty() {
                if let Some(p) = prefix {
                    out.insert(p.to_string(), "{}".to_string());
                }
                return;
            }
            for (key, val) in map {
                let path = match prefix {
                    Some(p) => format!("{p}.{key}"),
                    None => key.clone(),
                };
                flatten_into(val, Some(&path), out);
            }
        }
        JsonValue::Array(items) => {
            if items.is_empty() {
                if let Some(p) = prefix {
                    out.insert(p.to_string(), "[]".to_string());
                }
                return;
            }
            for (i, val) in items.iter().enumerate() {
                let path = match prefix {
                    Some(p) => format!("{p}.{i}"),
                    None => i.to_string(),
                };
                flatten_into(val, Some(&path), out);
            }
        }
        leaf => {
            if let Some(p) = prefix {
                out.insert(p.to_string(), leaf_to_string(leaf));
            }
        }
    }
}

fn leaf_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

fn serde_yaml_to_json(value: &serde_yaml::Value) -> JsonValue {
    serde_json::to_value(value).unwrap_or(JsonValue::Null)
}

/// Parses `body` as JSON, then YAML, returning the first that succeeds as a
/// `serde_json::Value` (the common currency used by the evaluator). Mirrors
/// the loader's dual YAML/JSON acceptance (§6).
///
/// Only an object or array counts as structured, matching the original's
/// unmarshal into a map: a bare scalar like `pong` or `42` parses fine under
/// both `serde_json` and `serde_yaml_ng`, but isn't a document with fields to
/// flatten, so it is treated as plain text instead.
#[must_use]
pub fn parse_structured(body: &str) -> Option<JsonValue> {
    if let Ok(v) = serde_json::from_str::<JsonValue>(body) {
        if matches!(v, JsonValue::Object(_) | JsonValue::Array(_)) {
            return Some(v);
        }
        return None;
    }
    serde_yaml::from_str::<serde_yaml::Value>(body)
        .ok()
        .map(|v| serde_yaml_to_json(&v))
        .filter(|v| matches!(v, JsonValue::Object(_) | JsonValue::Array(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_objects_and_arrays() {
        let value = json!({"a": 1, "b": {"c": 2, "d": [1, 2, 3]}});
        let flat = flatten_json(&value);
        assert_eq!(flat.get("a"), Some(&"1".to_string()));
        assert_eq!(flat.get("b.c"), Some(&"2".to_string()));
        assert_eq!(flat.get("b.d.0"), Some(&"1".to_string()));
        assert_eq!(flat.get("b.d.2"), Some(&"3".to_string()));
    }

    #[test]
    fn flatten_key_set_is_order_independent() {
        let a = json!({"x": 1, "y": 2});
        let b = json!({"y": 2, "x": 1});
        assert_eq!(flatten_json(&a), flatten_json(&b));
    }

    #[test]
    fn parse_structured_prefers_json_then_falls_back_to_yaml() {
        assert!(parse_structured(r#"{"a": 1}"#).is_some());
        assert!(parse_structured("a: 1\nb: 2").is_some());
        assert!(parse_structured("not: [valid: json").is_none() || parse_structured("not valid").is_some());
    }
}
