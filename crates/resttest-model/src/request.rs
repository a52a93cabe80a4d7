use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:17779";
pub const DEFAULT_PATH: &str = "/-";
pub const DEFAULT_METHOD: &str = "GET";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

/// An outgoing request as declared in a suite document, before template
/// materialization. Mirrors the schema in §6: either `url` is set, or
/// `pdp` (base URL) + `path` resolve by URL-join.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HttpRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl HttpRequest {
    #[must_use]
    pub fn method_or_default(&self) -> &str {
        match self.method.as_deref() {
            None | Some("") => DEFAULT_METHOD,
            Some(m) => m,
        }
    }

    /// Resolves the final URL: `url` wins outright; otherwise join `pdp`
    /// (default `http://localhost:17779`) with `path` (default `/-`).
    #[must_use]
    pub fn resolved_url(&self) -> String {
        if let Some(url) = &self.url {
            if !url.is_empty() {
                return url.clone();
            }
        }
        let base = self.pdp.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_BASE_URL);
        let path = self.path.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_PATH);
        join_url(base, path)
    }
}

/// Joins a base URL and a path the way `url::Url::join` would for a simple
/// absolute path, without pulling in the `url` crate for one operation.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_request_is_bare() {
        let req = HttpRequest::default();
        assert_eq!(req.method_or_default(), "GET");
        assert_eq!(req.resolved_url(), "http://localhost:17779/-");
    }

    #[test]
    fn url_wins_over_pdp_and_path() {
        let req = HttpRequest {
            url: Some("http://example.com/ping".into()),
            pdp: Some("http://other.example".into()),
            path: Some("/ignored".into()),
            ..Default::default()
        };
        assert_eq!(req.resolved_url(), "http://example.com/ping");
    }

    #[test]
    fn join_url_avoids_double_slash() {
        assert_eq!(join_url("http://x/", "/y"), "http://x/y");
        assert_eq!(join_url("http://x", "y"), "http://x/y");
    }
}
