use serde_json::Value as JsonValue;

/// Produces a human-readable `-expected +received` style diff for a JSON
/// mismatch. Hand-rolled rather than importing a diff crate: the shape
/// needed (one line per differing leaf path) is small and specific to this
/// domain, and the teacher's dependency stack carries no diffing crate to
/// reuse (documented in DESIGN.md).
#[must_use]
pub fn diff_leaves(expected: &JsonValue, received: &JsonValue) -> String {
    let mut lines = Vec::new();
    collect_diff(None, expected, received, &mut lines);
    lines.join("\n")
}

fn collect_diff(path: Option<&str>, expected: &JsonValue, received: &JsonValue, out: &mut Vec<String>) {
    match (expected, received) {
        (JsonValue::Object(emap), JsonValue::Object(rmap)) => {
            for (key, evalue) in emap {
                let child_path = match path {
                    Some(p) => format!("{p}.{key}"),
                    None => key.clone(),
                };
                match rmap.get(key) {
                    Some(rvalue) => collect_diff(Some(&child_path), evalue, rvalue, out),
                    None => {
                        out.push(format!("-{child_path}: {evalue}"));
                        out.push(format!("+{child_path}: <missing>"));
                    }
                }
            }
        }
        (JsonValue::Array(earr), JsonValue::Array(rarr)) => {
            for (i, evalue) in earr.iter().enumerate() {
                let child_path = match path {
                    Some(p) => format!("{p}.{i}"),
                    None => i.to_string(),
                };
                match rarr.get(i) {
                    Some(rvalue) => collect_diff(Some(&child_path), evalue, rvalue, out),
                    None => {
                        out.push(format!("-{child_path}: {evalue}"));
                        out.push(format!("+{child_path}: <missing>"));
                    }
                }
            }
        }
        (e, r) if e != r => {
            let label = path.unwrap_or("$");
            out.push(format!("-{label}: {e}"));
            out.push(format!("+{label}: {r}"));
        }
        _ => {}
    }
}

/// Subtree containment (§4.7): every key path reached in `expected` must be
/// present in `received` with the same leaf value. Extra keys in `received`
/// are allowed.
#[must_use]
pub fn includes(expected: &JsonValue, received: &JsonValue) -> Option<String> {
    let mut lines = Vec::new();
    collect_includes_diff(None, expected, received, &mut lines);
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn collect_includes_diff(path: Option<&str>, expected: &JsonValue, received: &JsonValue, out: &mut Vec<String>) {
    match expected {
        JsonValue::Object(emap) => {
            for (key, evalue) in emap {
                let child_path = match path {
                    Some(p) => format!("{p}.{key}"),
                    None => key.clone(),
                };
                match received.get(key) {
                    Some(rvalue) => collect_includes_diff(Some(&child_path), evalue, rvalue, out),
                    None => {
                        out.push(format!("-{child_path}: {evalue}"));
                        out.push(format!("+{child_path}: <missing>"));
                    }
                }
            }
        }
        JsonValue::Array(earr) => {
            for (i, evalue) in earr.iter().enumerate() {
                let child_path = match path {
                    Some(p) => format!("{p}.{i}"),
                    None => i.to_string(),
                };
                match received.get(i) {
                    Some(rvalue) => collect_includes_diff(Some(&child_path), evalue, rvalue, out),
                    None => {
                        out.push(format!("-{child_path}: {evalue}"));
                        out.push(format!("+{child_path}: <missing>"));
                    }
                }
            }
        }
        e if e != received => {
            let label = path.unwrap_or("$");
            out.push(format!("-{label}: {e}"));
            out.push(format!("+{label}: {received}"));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_includes_success() {
        let received = json!({"a": 1, "b": {"c": 2, "d": 3}});
        let expected = json!({"b": {"c": 2}});
        assert!(includes(&expected, &received).is_none());
    }

    #[test]
    fn json_includes_failure_produces_nonempty_diff() {
        let received = json!({"a": 1, "b": {"c": 2, "d": 3}});
        let expected = json!({"b": {"c": 99}});
        let diff = includes(&expected, &received).unwrap();
        assert!(diff.contains("b.c"));
    }

    #[test]
    fn full_equality_diff_reports_every_mismatch() {
        let expected = json!({"a": 1, "b": 2});
        let received = json!({"a": 1, "b": 3});
        let diff = diff_leaves(&expected, &received);
        assert!(diff.contains("-b: 2"));
        assert!(diff.contains("+b: 3"));
    }
}
