use serde::{Deserialize, Serialize};

use crate::operators::Operators;

/// Up to three optional claims on a response. An absent sub-structure makes
/// no claim and never fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Expectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<MeasureStatusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<MeasureHeaders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MeasureBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureStatusCode {
    pub is: Operators,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasureHeaders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<MeasureTotal>,
    #[serde(default)]
    pub items: Vec<MeasureHeaderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureTotal {
    pub is: Operators,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureHeaderItem {
    pub name: String,
    pub is: Operators,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct MeasureBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_format: Option<BodyFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_equal_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_with: Option<String>,
    #[serde(default)]
    pub fields: Vec<MeasureField>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureField {
    pub path: String,
    pub is: Operators,
}
