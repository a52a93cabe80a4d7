use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::expectation::Expectation;
use crate::request::HttpRequest;

/// A single file's worth of ordered cases. Document order is load-bearing:
/// captures from case *i* must be visible to case *i+k* for any *k>0*.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestSuite {
    #[serde(default, rename = "testcases")]
    pub test_cases: Vec<TestCase>,
    /// When true, every contained case is treated as pending regardless of
    /// its own `pending` field.
    #[serde(default)]
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Capture {
    #[serde(rename = "store-id")]
    pub store_id: String,
}

/// A single request+expectation unit. `title` must match
/// `[A-Za-z][\w\-\s.:;,]*`; `tags` entries must match
/// `[A-Za-z][A-Za-z0-9]*([_-][A-Za-z0-9]*)*` (enforced by the schema
/// validator, not re-checked here).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub request: HttpRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Capture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation: Option<Expectation>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "created-time", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
}

impl TestCase {
    /// True if either the case itself or its owning suite marks it pending.
    /// The suite-level flag is applied by the loader when this field is read
    /// through `TestSuite::iter_cases_with_pending`.
    #[must_use]
    pub fn capture_id(&self) -> Option<&str> {
        self.capture.as_ref().map(|c| c.store_id.as_str())
    }
}

impl TestSuite {
    /// Iterates cases alongside their *effective* pending flag, folding in
    /// the suite-level `pending` flag per the invariant in §3.
    pub fn iter_cases_with_pending(&self) -> impl Iterator<Item = (&TestCase, bool)> {
        self.test_cases
            .iter()
            .map(move |case| (case, self.pending || case.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_level_pending_propagates() {
        let suite = TestSuite {
            test_cases: vec![
                TestCase {
                    title: "a".into(),
                    version: None,
                    request: HttpRequest::default(),
                    capture: None,
                    expectation: None,
                    pending: false,
                    tags: vec![],
                    created_time: None,
                },
            ],
            pending: true,
        };
        let (_case, pending) = suite.iter_cases_with_pending().next().unwrap();
        assert!(pending);
    }

    #[test]
    fn empty_testcases_is_a_valid_suite() {
        let suite = TestSuite::default();
        assert_eq!(suite.test_cases.len(), 0);
    }
}
