use serde::{Deserialize, Serialize};

/// A value-level predicate set, applied conjunctively: every operator present
/// on an `Operators` instance must hold simultaneously for the assertion to pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Operators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal_to: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equal_to: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_of: Option<Vec<ScalarValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_member_of: Option<Vec<ScalarValue>>,
}

impl Operators {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equal_to.is_none()
            && self.not_equal_to.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
            && self.member_of.is_none()
            && self.not_member_of.is_none()
    }
}

/// A scalar operand as it appears in a document: boolean, number, or string.
/// Untagged so YAML/JSON literals deserialize without an explicit `kind` tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Number(n) => write!(f, "{n}"),
            ScalarValue::String(s) => write!(f, "{s}"),
        }
    }
}
