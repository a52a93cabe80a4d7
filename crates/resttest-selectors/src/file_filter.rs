use camino::Utf8Path;
use globset::Glob;
use regex::Regex;

/// Accepts/rejects descriptor paths by suffix, glob, or regular expression.
/// Grounded on `xchecker-selectors`'s use of `globset::Glob` for pattern
/// compilation, generalized from packet-selection patterns to file-path
/// inclusion/exclusion lists (§4.4).
#[derive(Debug, Default, Clone)]
pub struct FilePatternFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FilePatternFilter {
    #[must_use]
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        FilePatternFilter { include, exclude }
    }

    /// A path passes iff: the inclusion list is empty or it matches some
    /// inclusion pattern, AND the exclusion list is empty or it matches no
    /// exclusion pattern.
    #[must_use]
    pub fn accepts(&self, path: &Utf8Path) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| matches(path, p));
        let excluded = !self.exclude.is_empty() && self.exclude.iter().any(|p| matches(path, p));
        included && !excluded
    }
}

/// A path matches a pattern iff it ends with it as a literal suffix, OR
/// matches it as a shell-style glob, OR the pattern compiles as a regex that
/// matches.
fn matches(path: &Utf8Path, pattern: &str) -> bool {
    let path_str = path.as_str();

    if path_str.ends_with(pattern) {
        return true;
    }

    if let Ok(glob) = Glob::new(pattern) {
        if glob.compile_matcher().is_match(path_str) {
            return true;
        }
    }

    if let Ok(re) = Regex::new(pattern) {
        if re.is_match(path_str) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_match_accepts() {
        let filter = FilePatternFilter::new(vec!["_smoke.yaml".into()], vec![]);
        assert!(filter.accepts(Utf8Path::new("suites/login_smoke.yaml")));
        assert!(!filter.accepts(Utf8Path::new("suites/login.yaml")));
    }

    #[test]
    fn glob_inclusion_and_regex_exclusion_compose() {
        let filter = FilePatternFilter::new(
            vec!["suites/**/*.yaml".into()],
            vec!["^suites/legacy/.*".into()],
        );
        assert!(filter.accepts(Utf8Path::new("suites/a/b.yaml")));
        assert!(!filter.accepts(Utf8Path::new("suites/legacy/old.yaml")));
    }

    #[test]
    fn empty_lists_accept_everything() {
        let filter = FilePatternFilter::default();
        assert!(filter.accepts(Utf8Path::new("anything.yaml")));
    }
}
