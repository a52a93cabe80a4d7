use camino::Utf8PathBuf;
use resttest_fs::FileSystem;
use resttest_model::{HttpRequest, TestCase};
use resttest_selectors::{FilePatternFilter, Selector, TagManager};

use crate::loader::{Loader, DEFAULT_FILE_SUFFIX_RE};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no case matched the given selection")]
    NoMatch,
    #[error("selection is ambiguous, {count} cases matched: {candidates}")]
    Ambiguous { count: usize, candidates: String },
}

/// `gen curl`: resolve source selection to exactly one case, then print the
/// equivalent request invocation (§4.9). Grounded on the run controller's own
/// load/partition/filter/select pipeline, reused rather than duplicated.
pub struct GenerationController<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> GenerationController<'a> {
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        GenerationController { fs }
    }

    pub fn resolve_single_case(
        &self,
        test_dirs: &[Utf8PathBuf],
        file_filter: &FilePatternFilter,
        selector: &Selector,
        tag_manager: &TagManager,
    ) -> Result<TestCase, GenerationError> {
        let loader = Loader::new(self.fs);
        let descriptors = loader.load_dirs(test_dirs, DEFAULT_FILE_SUFFIX_RE);

        let mut matches = Vec::new();
        for descriptor in &descriptors {
            if !descriptor.is_valid() || !file_filter.accepts(&descriptor.locator.relative_to_cwd) {
                continue;
            }
            let Some(suite) = descriptor.suite() else { continue };
            for (case, effective_pending) in suite.iter_cases_with_pending() {
                if effective_pending || !selector.is_matched(&case.title) {
                    continue;
                }
                let (active, _) = tag_manager.is_active(&case.tags);
                if active {
                    matches.push(case.clone());
                }
            }
        }

        match matches.len() {
            0 => Err(GenerationError::NoMatch),
            1 => Ok(matches.into_iter().next().expect("checked len == 1")),
            count => {
                let candidates = matches
                    .iter()
                    .map(|c| format!("\"{}\" [{}]", c.title, c.tags.join(",")))
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(GenerationError::Ambiguous { count, candidates })
            }
        }
    }
}

/// Renders a request as an equivalent `curl` invocation.
#[must_use]
pub fn render_as_curl(request: &HttpRequest) -> String {
    let mut parts = vec!["curl".to_string(), "-X".to_string(), request.method_or_default().to_string()];
    for header in &request.headers {
        parts.push("-H".to_string());
        parts.push(format!("'{}: {}'", header.name, header.value));
    }
    if let Some(body) = &request.body {
        parts.push("-d".to_string());
        parts.push(format!("'{body}'"));
    }
    parts.push(format!("'{}'", request.resolved_url()));
    parts.join(" ")
}
