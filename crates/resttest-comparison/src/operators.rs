use resttest_model::Operators;

use crate::tagged_value::{canonical_cmp, canonical_eq, TaggedValue};

/// Applies every operator present on `ops` against `actual`, collecting a
/// human-readable failure message per violated operator. An empty result
/// means every present operator held (§3: "every present operator must hold
/// simultaneously").
#[must_use]
pub fn apply(ops: &Operators, actual: &TaggedValue) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(expected) = &ops.equal_to {
        let expected = TaggedValue::from(expected);
        if !canonical_eq(actual, &expected) {
            errors.push(format!(
                "value [{}] is not equal to expected value [{}]",
                actual.canonical_text(),
                expected.canonical_text()
            ));
        }
    }
    if let Some(expected) = &ops.not_equal_to {
        let expected = TaggedValue::from(expected);
        if canonical_eq(actual, &expected) {
            errors.push(format!(
                "value [{}] is unexpectedly equal to [{}]",
                actual.canonical_text(),
                expected.canonical_text()
            ));
        }
    }
    if let Some(expected) = &ops.lt {
        check_ordering(actual, expected, std::cmp::Ordering::Less, "less than", &mut errors);
    }
    if let Some(expected) = &ops.lte {
        check_ordering_or_eq(actual, expected, std::cmp::Ordering::Less, "less than or equal to", &mut errors);
    }
    if let Some(expected) = &ops.gt {
        check_ordering(actual, expected, std::cmp::Ordering::Greater, "greater than", &mut errors);
    }
    if let Some(expected) = &ops.gte {
        check_ordering_or_eq(actual, expected, std::cmp::Ordering::Greater, "greater than or equal to", &mut errors);
    }
    if let Some(list) = &ops.member_of {
        let tagged: Vec<TaggedValue> = list.iter().map(TaggedValue::from).collect();
        if !tagged.iter().any(|v| canonical_eq(actual, v)) {
            errors.push(format!(
                "value [{}] is not a member of the expected list",
                actual.canonical_text()
            ));
        }
    }
    if let Some(list) = &ops.not_member_of {
        let tagged: Vec<TaggedValue> = list.iter().map(TaggedValue::from).collect();
        if tagged.iter().any(|v| canonical_eq(actual, v)) {
            errors.push(format!(
                "value [{}] is unexpectedly a member of the excluded list",
                actual.canonical_text()
            ));
        }
    }

    errors
}

fn check_ordering(
    actual: &TaggedValue,
    expected: &resttest_model::ScalarValue,
    want: std::cmp::Ordering,
    label: &str,
    errors: &mut Vec<String>,
) {
    let expected = TaggedValue::from(expected);
    match canonical_cmp(actual, &expected) {
        Some(ord) if ord == want => {}
        Some(_) => errors.push(format!(
            "value [{}] is not {} [{}]",
            actual.canonical_text(),
            label,
            expected.canonical_text()
        )),
        None => errors.push(format!(
            "value [{}] is not comparable to [{}]",
            actual.canonical_text(),
            expected.canonical_text()
        )),
    }
}

fn check_ordering_or_eq(
    actual: &TaggedValue,
    expected: &resttest_model::ScalarValue,
    want: std::cmp::Ordering,
    label: &str,
    errors: &mut Vec<String>,
) {
    let expected_tagged = TaggedValue::from(expected);
    if canonical_eq(actual, &expected_tagged) {
        return;
    }
    check_ordering(actual, expected, want, label, errors);
}
