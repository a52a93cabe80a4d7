use resttest_model::HttpRequest;

use crate::cache::RestCache;
use crate::template::substitute;

/// Clones `request`, replacing every templating expression in method, URL,
/// base URL, path, header values, and body. Per-field errors are collected
/// but never fatal here — the examiner decides what to do with them (§4.5
/// step 3).
#[must_use]
pub fn materialize(request: &HttpRequest, cache: &RestCache) -> (HttpRequest, Vec<String>) {
    let mut errors = Vec::new();
    let mut materialized = request.clone();

    if let Some(method) = &request.method {
        let s = substitute(method, cache);
        materialized.method = Some(s.text);
        errors.extend(s.errors);
    }
    if let Some(url) = &request.url {
        let s = substitute(url, cache);
        materialized.url = Some(s.text);
        errors.extend(s.errors);
    }
    if let Some(pdp) = &request.pdp {
        let s = substitute(pdp, cache);
        materialized.pdp = Some(s.text);
        errors.extend(s.errors);
    }
    if let Some(path) = &request.path {
        let s = substitute(path, cache);
        materialized.path = Some(s.text);
        errors.extend(s.errors);
    }
    for header in &mut materialized.headers {
        let s = substitute(&header.value, cache);
        header.value = s.text;
        errors.extend(s.errors);
    }
    if let Some(body) = &request.body {
        let s = substitute(body, cache);
        materialized.body = Some(s.text);
        errors.extend(s.errors);
    }

    (materialized, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resttest_model::{HttpHeader, HttpResponse};

    #[test]
    fn template_chaining_header_propagates_into_the_next_request() {
        let mut cache = RestCache::new();
        cache.store(
            "login",
            HttpResponse {
                status_code: 200,
                status: "200 OK".into(),
                version: "HTTP/1.1".into(),
                headers: vec![HttpHeader {
                    name: "Set-Token".into(),
                    value: "XYZ".into(),
                }],
                body: b"{}".to_vec(),
            },
        );

        let request = HttpRequest {
            headers: vec![HttpHeader {
                name: "Authorization".into(),
                value: "${{ case[login].Header[Set-Token] }}".into(),
            }],
            ..Default::default()
        };

        let (materialized, errors) = materialize(&request, &cache);
        assert!(errors.is_empty());
        assert_eq!(materialized.headers[0].value, "XYZ");
    }

    #[test]
    fn unresolved_body_template_is_reported_but_not_fatal() {
        let cache = RestCache::new();
        let request = HttpRequest {
            body: Some(r#"{"id":"${{ case[missing].Body[id] }}"}"#.into()),
            ..Default::default()
        };
        let (materialized, errors) = materialize(&request, &cache);
        assert_eq!(errors.len(), 1);
        assert!(materialized.body.unwrap().contains("${{"));
    }
}
