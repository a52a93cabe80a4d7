use resttest_comparison::{flatten_json, parse_structured};
use resttest_model::{
    BodyFormat, Expectation, HttpHeader, HttpRequest, HttpResponse, MeasureBody, MeasureField,
    MeasureHeaderItem, MeasureHeaders, MeasureStatusCode,
};
use resttest_model::operators::{Operators, ScalarValue};
use resttest_transport::{HttpTransport, TransportError};

/// Header names excluded from a snapshot because they vary call to call
/// (§4.10): volatile transport metadata, never assertion-worthy.
const VOLATILE_HEADERS: &[&str] = &["content-length", "date"];

fn is_volatile_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    VOLATILE_HEADERS.contains(&lower.as_str()) || lower.starts_with("x-trace-") || lower.starts_with("x-request-id")
}

/// `req curl`: invoke a transport once with a directly-specified request and
/// either dump the exchange or synthesize a suite document from it (§4.10).
pub struct RequestController<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> RequestController<'a> {
    #[must_use]
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        RequestController { transport }
    }

    pub async fn invoke(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.transport.do_request(request).await
    }
}

/// Builds an expectation block from an executed exchange, the way a human
/// recording a new case by hand would derive one.
#[must_use]
pub fn snapshot_expectation(response: &HttpResponse) -> Expectation {
    let status_code = Some(MeasureStatusCode {
        is: Operators {
            equal_to: Some(ScalarValue::Number(f64::from(response.status_code))),
            ..Default::default()
        },
    });

    let mut header_names: Vec<String> = response
        .headers
        .iter()
        .map(|h| h.name.to_ascii_lowercase())
        .collect();
    header_names.sort_unstable();
    header_names.dedup();

    let items: Vec<MeasureHeaderItem> = header_names
        .into_iter()
        .filter(|name| !is_volatile_header(name))
        .filter_map(|name| {
            response.header_joined(&name).map(|value| MeasureHeaderItem {
                name,
                is: Operators {
                    equal_to: Some(ScalarValue::String(value)),
                    ..Default::default()
                },
            })
        })
        .collect();

    let headers = if items.is_empty() {
        None
    } else {
        Some(MeasureHeaders { total: None, items })
    };

    let body = Some(snapshot_body(response));

    Expectation { status_code, headers, body }
}

fn snapshot_body(response: &HttpResponse) -> MeasureBody {
    let raw = response.body_as_str().into_owned();

    if let Some(parsed) = parse_structured(&raw) {
        let format = if serde_json::from_str::<serde_json::Value>(&raw).is_ok() {
            BodyFormat::Json
        } else {
            BodyFormat::Yaml
        };
        let flat = flatten_json(&parsed);
        let fields = flat
            .into_iter()
            .map(|(path, value)| MeasureField {
                path,
                is: Operators {
                    equal_to: Some(ScalarValue::String(value)),
                    ..Default::default()
                },
            })
            .collect();
        return MeasureBody {
            has_format: Some(format),
            is_equal_to: None,
            includes: Some(raw),
            match_with: None,
            fields,
        };
    }

    MeasureBody {
        has_format: Some(BodyFormat::Text),
        is_equal_to: Some(raw),
        includes: None,
        match_with: Some(".*".to_string()),
        fields: Vec::new(),
    }
}

/// Renders a human-readable exchange dump (used when `--snapshot` is absent).
#[must_use]
pub fn render_exchange(request: &HttpRequest, response: &HttpResponse) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", request.method_or_default(), request.resolved_url()));
    for header in &request.headers {
        out.push_str(&format!("> {}: {}\n", header.name, header.value));
    }
    out.push('\n');
    out.push_str(&format!("{} {}\n", response.status_code, response.status));
    for header in &response.headers {
        out.push_str(&format!("< {}: {}\n", header.name, header.value));
    }
    out.push('\n');
    out.push_str(&response.body_as_str());
    out
}

#[must_use]
pub fn header_vec(pairs: &[(String, String)]) -> Vec<HttpHeader> {
    pairs
        .iter()
        .map(|(name, value)| HttpHeader { name: name.clone(), value: value.clone() })
        .collect()
}
