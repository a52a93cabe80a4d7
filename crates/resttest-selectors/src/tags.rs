use std::collections::{BTreeSet, HashMap};

/// Signed tag expressions partitioned into inclusive/exclusive sets. Grounded
/// on `engine/TagManager.go`, extended with the per-tag annotation map the
/// spec requires for colorized rendering (§4.3) — not present in the source.
pub struct TagManager {
    included: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

/// Whether a tag contributed to the inclusion (+1) or exclusion (-1) of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAnnotation {
    Included,
    Excluded,
}

impl TagManager {
    /// `tag_expressions` are comma-separated within each string, each token
    /// optionally prefixed with `+` (inclusive, also the default) or `-`
    /// (exclusive). Duplicates collapse; empty tokens are dropped.
    #[must_use]
    pub fn new(tag_expressions: &[String]) -> Self {
        let mut included = BTreeSet::new();
        let mut excluded = BTreeSet::new();
        for expr in tag_expressions {
            for token in expr.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                if let Some(tag) = token.strip_prefix('-') {
                    if !tag.is_empty() {
                        excluded.insert(tag.to_string());
                    }
                } else {
                    let tag = token.strip_prefix('+').unwrap_or(token);
                    if !tag.is_empty() {
                        included.insert(tag.to_string());
                    }
                }
            }
        }
        TagManager { included, excluded }
    }

    #[must_use]
    pub fn included_tags(&self) -> &BTreeSet<String> {
        &self.included
    }

    #[must_use]
    pub fn excluded_tags(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Applies the activation rule of §4.3 and returns both the verdict and
    /// the per-tag annotation map driving colorized rendering outside the core.
    #[must_use]
    pub fn is_active(&self, tags: &[String]) -> (bool, HashMap<String, TagAnnotation>) {
        let mut annotations = HashMap::new();

        if tags.is_empty() {
            return (true, annotations);
        }

        if !self.excluded.is_empty() {
            for tag in tags {
                if self.excluded.contains(tag) {
                    annotations.insert(tag.clone(), TagAnnotation::Excluded);
                    return (false, annotations);
                }
            }
        }

        if !self.included.is_empty() {
            let mut matched = false;
            for tag in tags {
                if self.included.contains(tag) {
                    annotations.insert(tag.clone(), TagAnnotation::Included);
                    matched = true;
                }
            }
            return (matched, annotations);
        }

        (true, annotations)
    }
}
