//! HTTP transport: `do(request) -> response | error`, grounded on
//! `HttpInvoker.go`. The source's "interceptor" mixins (detected via type
//! assertions) are replaced with two explicit optional hooks (§9 design
//! note): `pre(request)` runs just before the wire call, `post(request,
//! response)` runs just after a successful one.

use std::time::Duration;

use async_trait::async_trait;
use resttest_model::{HttpHeader, HttpRequest, HttpResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request build error: {0}")]
    Build(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn do_request(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

type PreHook = Box<dyn Fn(&mut HttpRequest) + Send + Sync>;
type PostHook = Box<dyn Fn(&HttpRequest, &HttpResponse) + Send + Sync>;

/// Live HTTP transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    default_timeout: Duration,
    pre: Option<PreHook>,
    post: Option<PostHook>,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        ReqwestTransport {
            client: reqwest::Client::new(),
            default_timeout: DEFAULT_TIMEOUT,
            pre: None,
            post: None,
        }
    }

    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_pre_hook(mut self, hook: PreHook) -> Self {
        self.pre = Some(hook);
        self
    }

    #[must_use]
    pub fn with_post_hook(mut self, hook: PostHook) -> Self {
        self.post = Some(hook);
        self
    }

    fn effective_timeout(&self, request: &HttpRequest) -> Duration {
        request
            .timeout
            .as_deref()
            .and_then(parse_duration)
            .unwrap_or(self.default_timeout)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn do_request(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut request = request.clone();
        if let Some(pre) = &self.pre {
            pre(&mut request);
        }

        let method = reqwest::Method::from_bytes(request.method_or_default().as_bytes())
            .map_err(|e| TransportError::Build(e.to_string()))?;
        let url = request.resolved_url();
        let timeout = self.effective_timeout(&request);

        let mut builder = self.client.request(method, &url).timeout(timeout);
        for header in &request.headers {
            if !header.name.is_empty() && !header.value.is_empty() {
                builder = builder.header(&header.name, &header.value);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        tracing::debug!(url = %url, method = %request.method_or_default(), "dispatching request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Request(e.to_string())
            }
        })?;

        let status_code = response.status().as_u16();
        let status = response.status().to_string();
        let version = format!("{:?}", response.version());
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| HttpHeader {
                name: name.to_string(),
                value: value.to_str().unwrap_or_default().to_string(),
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?
            .to_vec();

        let http_response = HttpResponse {
            status_code,
            status,
            version,
            headers,
            body,
        };

        if let Some(post) = &self.post {
            post(&request, &http_response);
        }

        Ok(http_response)
    }
}

/// Parses a duration string of the form accepted by the document schema:
/// a sequence of `<number><unit>` pairs with unit in `h`, `m`, `s`, `ms`,
/// `µs`/`us`, `ns` (e.g. `"1h30m"`, `"500ms"`).
#[must_use]
pub fn parse_duration(input: &str) -> Option<Duration> {
    let mut total = Duration::ZERO;
    let mut rest = input.trim();
    if rest.is_empty() {
        return None;
    }
    while !rest.is_empty() {
        let digits_end = rest.find(|c: char| !c.is_ascii_digit() && c != '.')?;
        let (number, tail) = rest.split_at(digits_end);
        let value: f64 = number.parse().ok()?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let unit_secs = match unit {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 1e-3,
            "us" | "\u{b5}s" => 1e-6,
            "ns" => 1e-9,
            _ => return None,
        };
        total += Duration::from_secs_f64(value * unit_secs);
        rest = tail;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_seconds() {
        assert_eq!(parse_duration("10s"), Some(Duration::from_secs(10)));
    }

    #[test]
    fn parses_compound_duration() {
        assert_eq!(
            parse_duration("1h30m"),
            Some(Duration::from_secs(3600 + 30 * 60))
        );
    }

    #[test]
    fn parses_milliseconds() {
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("potato"), None);
    }
}
