use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use resttest_cache::{materialize, RestCache};
use resttest_comparison::evaluate;
use resttest_model::{HttpResponse, TestCase};
use resttest_transport::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Pending,
    Ok,
    Error,
}

/// The outcome of executing exactly one case (§4.5).
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub status: CaseStatus,
    pub duration: Duration,
    pub errors: BTreeMap<String, String>,
    pub response: Option<HttpResponse>,
}

/// Executes one case against a transport, materializing its request through
/// the shared cache and evaluating its expectation. Grounded on
/// `engine/SpecHandler.go`'s single-case examination loop; generalized from
/// its packet/measure vocabulary to this domain's request/expectation one.
pub async fn examine(case: &TestCase, effective_pending: bool, cache: &mut RestCache, transport: &dyn HttpTransport) -> CaseResult {
    if effective_pending {
        return CaseResult {
            status: CaseStatus::Pending,
            duration: Duration::ZERO,
            errors: BTreeMap::new(),
            response: None,
        };
    }

    let start = Instant::now();

    let (materialized_request, template_errors) = materialize(&case.request, cache);

    let response = match transport.do_request(&materialized_request).await {
        Ok(response) => response,
        Err(e) => {
            let mut errors = BTreeMap::new();
            errors.insert("HttpClient".to_string(), e.to_string());
            return CaseResult {
                status: CaseStatus::Error,
                duration: start.elapsed(),
                errors,
                response: None,
            };
        }
    };

    let mut errors = match &case.expectation {
        Some(expectation) => evaluate(&response, expectation),
        None => BTreeMap::new(),
    };
    for (i, message) in template_errors.iter().enumerate() {
        errors.insert(format!("Template[{i}]"), message.clone());
    }

    if let Some(capture_id) = case.capture_id() {
        cache.store(capture_id, response.clone());
    }

    let status = if errors.is_empty() { CaseStatus::Ok } else { CaseStatus::Error };

    CaseResult {
        status,
        duration: start.elapsed(),
        errors,
        response: Some(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use resttest_model::{Expectation, HttpRequest, MeasureStatusCode};
    use resttest_model::operators::{Operators, ScalarValue};
    use resttest_transport::TransportError;

    struct StubTransport {
        response: HttpResponse,
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn do_request(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(self.response.clone())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn do_request(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Request("connection refused".to_string()))
        }
    }

    fn ok_response() -> HttpResponse {
        HttpResponse {
            status_code: 200,
            status: "200 OK".to_string(),
            version: "HTTP/1.1".to_string(),
            headers: vec![],
            body: b"pong".to_vec(),
        }
    }

    #[tokio::test]
    async fn pending_case_never_reaches_the_transport() {
        let case = TestCase {
            title: "a".into(),
            version: None,
            request: HttpRequest::default(),
            capture: None,
            expectation: None,
            pending: true,
            tags: vec![],
            created_time: None,
        };
        let mut cache = RestCache::new();
        let transport = FailingTransport;
        let result = examine(&case, true, &mut cache, &transport).await;
        assert_eq!(result.status, CaseStatus::Pending);
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_reported_under_http_client() {
        let case = TestCase {
            title: "a".into(),
            version: None,
            request: HttpRequest::default(),
            capture: None,
            expectation: None,
            pending: false,
            tags: vec![],
            created_time: None,
        };
        let mut cache = RestCache::new();
        let transport = FailingTransport;
        let result = examine(&case, false, &mut cache, &transport).await;
        assert_eq!(result.status, CaseStatus::Error);
        assert!(result.errors.contains_key("HttpClient"));
    }

    #[tokio::test]
    async fn successful_case_is_ok_and_captures_the_response() {
        let case = TestCase {
            title: "a".into(),
            version: None,
            request: HttpRequest::default(),
            capture: Some(resttest_model::Capture { store_id: "first".into() }),
            expectation: Some(Expectation {
                status_code: Some(MeasureStatusCode {
                    is: Operators { equal_to: Some(ScalarValue::Number(200.0)), ..Default::default() },
                }),
                headers: None,
                body: None,
            }),
            pending: false,
            tags: vec![],
            created_time: None,
        };
        let mut cache = RestCache::new();
        let transport = StubTransport { response: ok_response() };
        let result = examine(&case, false, &mut cache, &transport).await;
        assert_eq!(result.status, CaseStatus::Ok);
        assert!(cache.contains("first"));
    }
}
