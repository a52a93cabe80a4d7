use once_cell::sync::Lazy;
use regex::Regex;

use crate::cache::RestCache;
use crate::query;

static EXPRESSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{\{(.*?)\}\}").unwrap());

/// Result of resolving every `${{ ... }}` expression found in one piece of
/// text: the rewritten text plus one error message per expression that
/// could not be resolved. An unresolved expression is left as the literal
/// placeholder rather than dropped (§4.6).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    pub text: String,
    pub errors: Vec<String>,
}

/// Replaces every templating expression embedded in `text`. Unparseable
/// expressions (malformed syntax, not a recognized attribute) are left in
/// place and reported as an error, matching a failed-to-resolve capture.
#[must_use]
pub fn substitute(text: &str, cache: &RestCache) -> Substitution {
    let mut errors = Vec::new();
    let rewritten = EXPRESSION_RE.replace_all(text, |caps: &regex::Captures| {
        let raw = caps[1].trim();
        match query::parse(raw) {
            Some(q) => match cache.resolve(&q) {
                Ok(value) => value,
                Err(e) => {
                    errors.push(e);
                    caps[0].to_string()
                }
            },
            None => {
                errors.push(format!("unrecognized template expression: {raw}"));
                caps[0].to_string()
            }
        }
    });
    Substitution {
        text: rewritten.into_owned(),
        errors,
    }
}
