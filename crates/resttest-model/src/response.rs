use crate::request::HttpHeader;

/// A received HTTP response. Header keys are matched case-insensitively
/// elsewhere in the pipeline, but the original casing is preserved here.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status: String,
    pub version: String,
    pub headers: Vec<HttpHeader>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn body_as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Case-insensitive header lookup, joining repeated values with `", "`
    /// per the template engine's `Header[<name>]` attribute semantics.
    #[must_use]
    pub fn header_joined(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self
            .headers
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    #[must_use]
    pub fn distinct_header_count(&self) -> usize {
        let mut names: Vec<String> = self
            .headers
            .iter()
            .map(|h| h.name.to_ascii_lowercase())
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}
