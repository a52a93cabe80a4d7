use once_cell::sync::Lazy;
use regex::Regex;

/// Which response attribute a template expression refers to (§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Status,
    StatusCode,
    Header(String),
    Body,
    BodyField(String),
}

/// A parsed `${{ case[<id>].<attr>[:-<default>] }}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub case_id: String,
    pub attribute: Attribute,
    pub default: Option<String>,
}

static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*case\[([^\]]*)\]\.Status\s*(:-([^}]*))?\s*$").unwrap());
static STATUS_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*case\[([^\]]*)\]\.StatusCode\s*(:-([^}]*))?\s*$").unwrap());
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*case\[([^\]]*)\]\.Header\[([^\]]*)\]\s*(:-([^}]*))?\s*$").unwrap());
static BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*case\[([^\]]*)\]\.Body\s*(:-([^}]*))?\s*$").unwrap());
static BODY_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*case\[([^\]]*)\]\.Body\[([^\]]*)\]\s*(:-([^}]*))?\s*$").unwrap());

/// Parses the inside of a `${{ ... }}` expression. Order matters: `Header[x]`
/// and `Body[x]` must be tried before the bare `Header`/`Body` forms they'd
/// otherwise also match a prefix of (mirrors `RestCache.go`'s `Parse`).
#[must_use]
pub fn parse(expr: &str) -> Option<Query> {
    if let Some(caps) = STATUS_CODE_RE.captures(expr) {
        return Some(Query {
            case_id: caps[1].to_string(),
            attribute: Attribute::StatusCode,
            default: caps.get(3).map(|m| m.as_str().trim().to_string()),
        });
    }
    if let Some(caps) = STATUS_RE.captures(expr) {
        return Some(Query {
            case_id: caps[1].to_string(),
            attribute: Attribute::Status,
            default: caps.get(3).map(|m| m.as_str().trim().to_string()),
        });
    }
    if let Some(caps) = HEADER_RE.captures(expr) {
        return Some(Query {
            case_id: caps[1].to_string(),
            attribute: Attribute::Header(caps[2].to_string()),
            default: caps.get(4).map(|m| m.as_str().trim().to_string()),
        });
    }
    if let Some(caps) = BODY_FIELD_RE.captures(expr) {
        return Some(Query {
            case_id: caps[1].to_string(),
            attribute: Attribute::BodyField(caps[2].to_string()),
            default: caps.get(4).map(|m| m.as_str().trim().to_string()),
        });
    }
    if let Some(caps) = BODY_RE.captures(expr) {
        return Some(Query {
            case_id: caps[1].to_string(),
            attribute: Attribute::Body,
            default: caps.get(3).map(|m| m.as_str().trim().to_string()),
        });
    }
    None
}
