use std::collections::BTreeMap;

use regex::Regex;
use resttest_model::{BodyFormat, Expectation, HttpResponse, MeasureBody, MeasureHeaders, MeasureStatusCode};

use crate::diff;
use crate::flatten::flatten_json;
use crate::operators::apply;
use crate::tagged_value::TaggedValue;

/// Evaluates the expectation tree against a response, collecting errors
/// without short-circuit across siblings (§4.7). Keys follow the path-like
/// scheme from §4.5: `StatusCode`, `Header[<name>]`, `Header/Total`, `Body`,
/// `Body/IsEqualTo`, `Body/Includes`, `Body/Fields/<path>`,
/// `Body/Expectation`, `Body/ReceivedObject`.
#[must_use]
pub fn evaluate(response: &HttpResponse, expectation: &Expectation) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if let Some(status_code) = &expectation.status_code {
        evaluate_status_code(response.status_code, status_code, &mut errors);
    }
    if let Some(headers) = &expectation.headers {
        evaluate_headers(response, headers, &mut errors);
    }
    if let Some(body) = &expectation.body {
        evaluate_body(response, body, &mut errors);
    }

    errors
}

fn evaluate_status_code(
    status_code: u16,
    spec: &MeasureStatusCode,
    errors: &mut BTreeMap<String, String>,
) {
    let actual = TaggedValue::from_i64(i64::from(status_code));
    let violations = apply(&spec.is, &actual);
    if !violations.is_empty() {
        errors.insert("StatusCode".to_string(), violations.join("; "));
    }
}

fn evaluate_headers(response: &HttpResponse, spec: &MeasureHeaders, errors: &mut BTreeMap<String, String>) {
    if let Some(total) = &spec.total {
        let actual = TaggedValue::from_i64(i64::try_from(response.distinct_header_count()).unwrap_or(i64::MAX));
        let violations = apply(&total.is, &actual);
        if !violations.is_empty() {
            errors.insert("Header/Total".to_string(), violations.join("; "));
        }
    }

    for item in &spec.items {
        let value = response.header_joined(&item.name).unwrap_or_default();
        let actual = TaggedValue::from_str_value(&value);
        let violations = apply(&item.is, &actual);
        if !violations.is_empty() {
            errors.insert(format!("Header[{}]", item.name), violations.join("; "));
        }
    }
}

fn evaluate_body(response: &HttpResponse, spec: &MeasureBody, errors: &mut BTreeMap<String, String>) {
    let has_any_assertion =
        spec.is_equal_to.is_some() || spec.includes.is_some() || spec.match_with.is_some() || !spec.fields.is_empty();

    let Some(format) = spec.has_format else {
        if has_any_assertion {
            errors.insert(
                "Body/Expectation".to_string(),
                "has-format is required when a body assertion is present".to_string(),
            );
        }
        return;
    };

    match format {
        BodyFormat::Text => evaluate_text_body(response, spec, errors),
        BodyFormat::Json | BodyFormat::Yaml => evaluate_structured_body(response, spec, format, errors),
    }
}

fn evaluate_text_body(response: &HttpResponse, spec: &MeasureBody, errors: &mut BTreeMap<String, String>) {
    if spec.is_equal_to.is_none() && spec.match_with.is_none() {
        errors.insert(
            "Body/Expectation".to_string(),
            "text body expectation requires is-equal-to or match-with".to_string(),
        );
        return;
    }

    let body = response.body_as_str();

    if let Some(expected) = &spec.is_equal_to {
        if body.as_ref() != expected.as_str() {
            errors.insert(
                "Body/IsEqualTo".to_string(),
                format!("-{expected}\n+{body}"),
            );
        }
    }

    if let Some(pattern) = &spec.match_with {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(&body) {
                    errors.insert(
                        "Body".to_string(),
                        format!("body does not match pattern /{pattern}/"),
                    );
                }
            }
            Err(e) => {
                errors.insert("Body/Expectation".to_string(), format!("invalid match-with pattern: {e}"));
            }
        }
    }
}

fn evaluate_structured_body(
    response: &HttpResponse,
    spec: &MeasureBody,
    format: BodyFormat,
    errors: &mut BTreeMap<String, String>,
) {
    let body = response.body_as_str();
    let Some(received) = parse_with_format(&body, format) else {
        errors.insert(
            "Body/ReceivedObject".to_string(),
            "response body is empty or does not parse in the declared format".to_string(),
        );
        return;
    };

    if let Some(expected_raw) = &spec.is_equal_to {
        match parse_with_format(expected_raw, format) {
            Some(expected) if expected == received => {}
            Some(expected) => {
                errors.insert("Body/IsEqualTo".to_string(), diff::diff_leaves(&expected, &received));
            }
            None => {
                errors.insert(
                    "Body/Expectation".to_string(),
                    "is-equal-to value does not parse in the declared format".to_string(),
                );
            }
        }
    }

    if let Some(expected_raw) = &spec.includes {
        match parse_with_format(expected_raw, format) {
            Some(expected) => {
                if let Some(diff) = diff::includes(&expected, &received) {
                    errors.insert("Body/Includes".to_string(), diff);
                }
            }
            None => {
                errors.insert(
                    "Body/Expectation".to_string(),
                    "includes value does not parse in the declared format".to_string(),
                );
            }
        }
    }

    if !spec.fields.is_empty() {
        let flat = flatten_json(&received);
        for field in &spec.fields {
            match flat.get(&field.path) {
                None => {
                    errors.insert(
                        format!("Body/Fields/{}", field.path),
                        "Field not found".to_string(),
                    );
                }
                Some(leaf) => {
                    let actual = infer_tagged(leaf);
                    let violations = apply(&field.is, &actual);
                    if !violations.is_empty() {
                        errors.insert(format!("Body/Fields/{}", field.path), violations.join("; "));
                    }
                }
            }
        }
    }
}

fn parse_with_format(text: &str, format: BodyFormat) -> Option<serde_json::Value> {
    match format {
        BodyFormat::Json => serde_json::from_str(text).ok(),
        BodyFormat::Yaml => serde_yaml::from_str::<serde_yaml::Value>(text)
            .ok()
            .and_then(|v| serde_json::to_value(v).ok()),
        BodyFormat::Text => None,
    }
}

/// A flattened leaf is stored as plain text; recover its tagged kind the
/// same way the source's dynamic typing would, by attempting bool then
/// number before falling back to string.
fn infer_tagged(leaf: &str) -> TaggedValue {
    if let Ok(b) = leaf.parse::<bool>() {
        return TaggedValue::Bool(b);
    }
    if let Ok(n) = leaf.parse::<f64>() {
        return TaggedValue::Number(n);
    }
    TaggedValue::String(leaf.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resttest_model::{HttpHeader, MeasureField, Operators, ScalarValue};

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            status: format!("{status_code}"),
            version: "HTTP/1.1".into(),
            headers: vec![HttpHeader {
                name: "Content-Type".into(),
                value: "application/json".into(),
            }],
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn scenario_1_simple_200_text_assertion() {
        let resp = response(200, "pong");
        let expectation = Expectation {
            status_code: Some(MeasureStatusCode {
                is: Operators {
                    equal_to: Some(ScalarValue::Number(200.0)),
                    ..Default::default()
                },
            }),
            headers: None,
            body: Some(MeasureBody {
                has_format: Some(BodyFormat::Text),
                is_equal_to: Some("pong".into()),
                ..Default::default()
            }),
        };
        let errors = evaluate(&resp, &expectation);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn scenario_2_json_includes_success() {
        let resp = response(200, r#"{"a":1,"b":{"c":2,"d":3}}"#);
        let expectation = Expectation {
            status_code: None,
            headers: None,
            body: Some(MeasureBody {
                has_format: Some(BodyFormat::Json),
                includes: Some(r#"{"b":{"c":2}}"#.into()),
                ..Default::default()
            }),
        };
        let errors = evaluate(&resp, &expectation);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn scenario_3_json_includes_failure() {
        let resp = response(200, r#"{"a":1,"b":{"c":2,"d":3}}"#);
        let expectation = Expectation {
            status_code: None,
            headers: None,
            body: Some(MeasureBody {
                has_format: Some(BodyFormat::Json),
                includes: Some(r#"{"b":{"c":99}}"#.into()),
                ..Default::default()
            }),
        };
        let errors = evaluate(&resp, &expectation);
        assert!(errors.contains_key("Body/Includes"));
        assert!(!errors["Body/Includes"].is_empty());
    }

    #[test]
    fn missing_field_reports_field_not_found() {
        let resp = response(200, r#"{"a":1}"#);
        let expectation = Expectation {
            status_code: None,
            headers: None,
            body: Some(MeasureBody {
                has_format: Some(BodyFormat::Json),
                fields: vec![MeasureField {
                    path: "missing.leaf".into(),
                    is: Operators {
                        equal_to: Some(ScalarValue::String("x".into())),
                        ..Default::default()
                    },
                }],
                ..Default::default()
            }),
        };
        let errors = evaluate(&resp, &expectation);
        assert_eq!(errors.get("Body/Fields/missing.leaf"), Some(&"Field not found".to_string()));
    }

    #[test]
    fn body_assertion_without_has_format_is_an_error() {
        let resp = response(200, "pong");
        let expectation = Expectation {
            status_code: None,
            headers: None,
            body: Some(MeasureBody {
                is_equal_to: Some("pong".into()),
                ..Default::default()
            }),
        };
        let errors = evaluate(&resp, &expectation);
        assert!(errors.contains_key("Body/Expectation"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let resp = response(200, r#"{"a":1}"#);
        let expectation = Expectation {
            status_code: Some(MeasureStatusCode {
                is: Operators {
                    equal_to: Some(ScalarValue::Number(404.0)),
                    ..Default::default()
                },
            }),
            headers: None,
            body: None,
        };
        let first = evaluate(&resp, &expectation);
        let second = evaluate(&resp, &expectation);
        assert_eq!(first, second);
    }
}
