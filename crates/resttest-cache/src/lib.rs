pub mod cache;
pub mod materialize;
pub mod query;
pub mod template;

pub use cache::RestCache;
pub use materialize::materialize;
pub use query::{parse, Attribute, Query};
pub use template::{substitute, Substitution};
