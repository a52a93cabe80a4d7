//! Data model: suites, cases, requests, responses, expectations, operators.

pub mod descriptor;
pub mod expectation;
pub mod locator;
pub mod operators;
pub mod request;
pub mod response;
pub mod suite;

pub use descriptor::{Descriptor, DescriptorOutcome};
pub use expectation::{
    BodyFormat, Expectation, MeasureBody, MeasureField, MeasureHeaderItem, MeasureHeaders,
    MeasureStatusCode, MeasureTotal,
};
pub use locator::Locator;
pub use operators::{Operators, ScalarValue};
pub use request::{HttpHeader, HttpRequest};
pub use response::HttpResponse;
pub use suite::{Capture, TestCase, TestSuite};
