pub mod diff;
pub mod evaluator;
pub mod flatten;
pub mod operators;
pub mod tagged_value;

pub use diff::{diff_leaves, includes};
pub use evaluator::evaluate;
pub use flatten::{flatten_json, parse_structured};
pub use operators::apply;
pub use tagged_value::{canonical_cmp, canonical_eq, TaggedValue};
