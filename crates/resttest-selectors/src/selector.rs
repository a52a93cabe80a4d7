use regex::Regex;

/// Legal title character set per the document schema (`§3`): a letter
/// followed by word characters, hyphens, whitespace, and a handful of
/// punctuation marks. A pattern made entirely of these characters is treated
/// as a plain substring, never a regex.
fn is_legal_title_charset(pattern: &str) -> bool {
    !pattern.is_empty()
        && pattern
            .chars()
            .all(|c| c.is_alphanumeric() || "_- \t.:;,".contains(c))
}

enum Mode {
    Blank,
    Substring(String),
    Regex(Regex),
}

/// Decides whether a case's title matches a user-supplied pattern. Grounded
/// on `script/Selector.go`, with the dual substring/regex mode made explicit
/// (the fallback-on-compile-failure branch the spec calls for, §4.2).
pub struct Selector {
    mode: Mode,
}

impl Selector {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        if pattern.is_empty() {
            return Selector { mode: Mode::Blank };
        }
        if is_legal_title_charset(pattern) {
            return Selector {
                mode: Mode::Substring(canonical_form(pattern)),
            };
        }
        match Regex::new(&pattern.to_lowercase()) {
            Ok(re) => Selector {
                mode: Mode::Regex(re),
            },
            Err(_) => Selector {
                mode: Mode::Substring(canonical_form(pattern)),
            },
        }
    }

    #[must_use]
    pub fn type_of_filter(&self) -> &'static str {
        match self.mode {
            Mode::Blank => "blank",
            Mode::Substring(_) => "string",
            Mode::Regex(_) => "regexp",
        }
    }

    #[must_use]
    pub fn is_matched(&self, title: &str) -> bool {
        match &self.mode {
            Mode::Blank => true,
            Mode::Substring(pattern) => canonical_form(title).contains(pattern.as_str()),
            Mode::Regex(re) => re.is_match(&canonical_form(title)),
        }
    }
}

/// Trim, collapse internal whitespace to single spaces, lowercase.
#[must_use]
pub fn canonical_form(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_matches_everything() {
        let selector = Selector::new("");
        assert_eq!(selector.type_of_filter(), "blank");
        assert!(selector.is_matched("anything at all"));
    }

    #[test]
    fn legal_charset_pattern_is_substring_match() {
        let selector = Selector::new("Login Flow");
        assert_eq!(selector.type_of_filter(), "string");
        assert!(selector.is_matched("User   LOGIN flow happy path"));
        assert!(!selector.is_matched("Logout flow"));
    }

    #[test]
    fn illegal_charset_pattern_compiles_as_regex() {
        let selector = Selector::new("^login.*$");
        assert_eq!(selector.type_of_filter(), "regexp");
        assert!(selector.is_matched("login via oauth"));
        assert!(!selector.is_matched("oauth login"));
    }

    #[test]
    fn regex_compile_failure_falls_back_to_substring() {
        // An unbalanced character class is illegal regex but still not a
        // legal-title-charset string (contains '[').
        let selector = Selector::new("weird[pattern");
        assert_eq!(selector.type_of_filter(), "string");
        assert!(selector.is_matched("a weird[pattern here"));
    }

    #[test]
    fn canonical_form_collapses_whitespace_and_lowercases() {
        assert_eq!(canonical_form("  Foo   Bar  "), "foo bar");
    }
}
