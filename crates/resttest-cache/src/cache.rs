use std::collections::BTreeMap;

use resttest_comparison::flatten::flatten_json;
use resttest_comparison::parse_structured;
use resttest_model::HttpResponse;

use crate::query::Attribute;

/// A captured response plus its pre-flattened body fields, keyed by capture
/// identifier. Flat namespace shared across every suite in one run (§3
/// invariant: "a later write overwrites an earlier one").
#[derive(Debug, Default)]
pub struct RestCache {
    entries: BTreeMap<String, CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: HttpResponse,
    fields: BTreeMap<String, String>,
}

impl RestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `response` under `case_id`, overwriting any prior capture.
    /// Called regardless of whether the case's own assertions passed.
    pub fn store(&mut self, case_id: &str, response: HttpResponse) {
        let fields = parse_structured(&response.body_as_str())
            .map(|v| flatten_json(&v))
            .unwrap_or_default();
        self.entries.insert(case_id.to_string(), CacheEntry { response, fields });
    }

    #[must_use]
    pub fn contains(&self, case_id: &str) -> bool {
        self.entries.contains_key(case_id)
    }

    fn resolve_attribute(&self, case_id: &str, attribute: &Attribute) -> Option<String> {
        let entry = self.entries.get(case_id)?;
        match attribute {
            Attribute::Status => Some(entry.response.status.clone()),
            Attribute::StatusCode => Some(entry.response.status_code.to_string()),
            Attribute::Header(name) => entry.response.header_joined(name),
            Attribute::Body => Some(entry.response.body_as_str().into_owned()),
            Attribute::BodyField(path) => entry.fields.get(path).cloned(),
        }
    }

    /// Resolves a single `${{ case[<id>].<attr>[:-<default>] }}` expression,
    /// using `default` when the capture or attribute is unavailable. Returns
    /// `Err` (with a message) only when no default was supplied either.
    pub fn resolve(&self, query: &crate::query::Query) -> Result<String, String> {
        if let Some(value) = self.resolve_attribute(&query.case_id, &query.attribute) {
            return Ok(value);
        }
        if let Some(default) = &query.default {
            return Ok(default.clone());
        }
        Err(format!(
            "no capture named \"{}\" has the requested attribute and no default was supplied",
            query.case_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse;
    use resttest_model::HttpHeader;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            status: format!("{status_code} OK"),
            version: "HTTP/1.1".into(),
            headers: vec![HttpHeader {
                name: "Set-Token".into(),
                value: "XYZ".into(),
            }],
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn resolves_header_attribute_from_a_prior_capture() {
        let mut cache = RestCache::new();
        cache.store("login", response(200, "{}"));
        let query = parse("case[login].Header[Set-Token]").unwrap();
        assert_eq!(cache.resolve(&query), Ok("XYZ".to_string()));
    }

    #[test]
    fn resolves_flattened_body_field() {
        let mut cache = RestCache::new();
        cache.store("create", response(201, r#"{"user":{"id":42}}"#));
        let query = parse("case[create].Body[user.id]").unwrap();
        assert_eq!(cache.resolve(&query), Ok("42".to_string()));
    }

    #[test]
    fn missing_capture_falls_back_to_default() {
        let cache = RestCache::new();
        let query = parse("case[missing].StatusCode:-0").unwrap();
        assert_eq!(cache.resolve(&query), Ok("0".to_string()));
    }

    #[test]
    fn missing_capture_without_default_is_an_error() {
        let cache = RestCache::new();
        let query = parse("case[missing].Status").unwrap();
        assert!(cache.resolve(&query).is_err());
    }

    #[test]
    fn a_later_store_overwrites_an_earlier_one_for_the_same_id() {
        let mut cache = RestCache::new();
        cache.store("ping", response(200, "first"));
        cache.store("ping", response(500, "second"));
        let query = parse("case[ping].StatusCode").unwrap();
        assert_eq!(cache.resolve(&query), Ok("500".to_string()));
    }
}
