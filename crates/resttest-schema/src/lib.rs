//! Schema validation, grounded on `schema/Validator.go`: a validator is built
//! once from an embedded schema string and validates arbitrary parsed
//! documents against it.

use once_cell::sync::Lazy;
use serde_json::Value;

const SUITE_SCHEMA_SRC: &str = include_str!("suite_schema.json");

static SUITE_SCHEMA: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(SUITE_SCHEMA_SRC).expect("embedded schema is valid JSON"));

static VALIDATOR: Lazy<jsonschema::Validator> = Lazy::new(|| {
    jsonschema::validator_for(&SUITE_SCHEMA).expect("embedded schema compiles")
});

/// Validates a parsed document (already deserialized from YAML or JSON into
/// a `serde_json::Value`) against the test suite schema. Returns every
/// violation found; an empty vector means the document is valid.
#[must_use]
pub fn validate(document: &Value) -> Vec<String> {
    VALIDATOR
        .iter_errors(document)
        .map(|e| e.to_string())
        .collect()
}

#[must_use]
pub fn is_valid(document: &Value) -> bool {
    VALIDATOR.is_valid(document)
}
