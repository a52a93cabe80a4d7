//! Selection layer: title selector, tag manager, and file-pattern filter.

pub mod file_filter;
pub mod selector;
pub mod tags;

pub use file_filter::FilePatternFilter;
pub use selector::{canonical_form, Selector};
pub use tags::{TagAnnotation, TagManager};
