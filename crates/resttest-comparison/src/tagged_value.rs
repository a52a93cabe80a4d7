use resttest_model::ScalarValue;

/// Replaces the source's reflection-based equality (`Comparison.go`'s
/// `reflect.DeepEqual`/`fmt.Sprintf` coercion) with an explicit tagged union
/// (§9 design note). Every comparison dispatches on `kind` and operates on
/// the canonical textual form, never on Rust-native `Any` downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl TaggedValue {
    #[must_use]
    pub fn canonical_text(&self) -> String {
        match self {
            TaggedValue::Bool(b) => b.to_string(),
            TaggedValue::Number(n) => format_number(*n),
            TaggedValue::String(s) => s.clone(),
        }
    }

    /// Numeric value if this operand is, or can be parsed as, a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TaggedValue::Number(n) => Some(*n),
            TaggedValue::String(s) => s.parse().ok(),
            TaggedValue::Bool(_) => None,
        }
    }

    #[must_use]
    pub fn from_str_value(s: &str) -> TaggedValue {
        TaggedValue::String(s.to_string())
    }

    #[must_use]
    pub fn from_i64(n: i64) -> TaggedValue {
        #[allow(clippy::cast_precision_loss)]
        TaggedValue::Number(n as f64)
    }
}

impl From<&ScalarValue> for TaggedValue {
    fn from(value: &ScalarValue) -> Self {
        match value {
            ScalarValue::Bool(b) => TaggedValue::Bool(*b),
            ScalarValue::Number(n) => TaggedValue::Number(*n),
            ScalarValue::String(s) => TaggedValue::String(s.clone()),
        }
    }
}

/// Canonical equality: two operands are equal if their canonical textual
/// forms match, regardless of kind — so `1`, `1.0`, and `"1"` all compare
/// equal.
#[must_use]
pub fn canonical_eq(a: &TaggedValue, b: &TaggedValue) -> bool {
    if let (TaggedValue::Bool(x), TaggedValue::Bool(y)) = (a, b) {
        return x == y;
    }
    if matches!(a, TaggedValue::Bool(_)) != matches!(b, TaggedValue::Bool(_)) {
        // Boolean vs non-boolean is never equal, even by text, to avoid
        // "true" == 1-style surprises the source never intended.
        return false;
    }
    a.canonical_text() == b.canonical_text()
}

/// Ordering comparison: both sides numeric, or both sides string-lexicographic.
#[must_use]
pub fn canonical_cmp(a: &TaggedValue, b: &TaggedValue) -> Option<std::cmp::Ordering> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (TaggedValue::String(x), TaggedValue::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Avoids the default `f64` formatting producing `1` vs `1.0` divergence:
/// an integral value renders without a trailing `.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_float_compare_equal() {
        assert!(canonical_eq(&TaggedValue::Number(1.0), &TaggedValue::Number(1.0)));
        assert!(canonical_eq(
            &TaggedValue::Number(1.0),
            &TaggedValue::String("1".into())
        ));
    }

    #[test]
    fn boolean_is_exact() {
        assert!(canonical_eq(&TaggedValue::Bool(true), &TaggedValue::Bool(true)));
        assert!(!canonical_eq(&TaggedValue::Bool(true), &TaggedValue::Bool(false)));
        assert!(!canonical_eq(&TaggedValue::Bool(true), &TaggedValue::Number(1.0)));
    }

    #[test]
    fn ordering_requires_both_numeric_or_both_string() {
        assert_eq!(
            canonical_cmp(&TaggedValue::Number(1.0), &TaggedValue::Number(2.0)),
            Some(std::cmp::Ordering::Less)
        );
        assert_eq!(
            canonical_cmp(&TaggedValue::String("a".into()), &TaggedValue::String("b".into())),
            Some(std::cmp::Ordering::Less)
        );
        assert_eq!(
            canonical_cmp(&TaggedValue::Bool(true), &TaggedValue::Number(1.0)),
            None
        );
    }

    proptest::proptest! {
        #[test]
        fn any_integer_equals_its_string_and_float_form(n: i32) {
            let as_int = TaggedValue::Number(f64::from(n));
            let as_str = TaggedValue::String(n.to_string());
            proptest::prop_assert!(canonical_eq(&as_int, &as_str));
        }
    }
}
