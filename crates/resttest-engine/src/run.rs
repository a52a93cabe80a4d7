use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use resttest_cache::RestCache;
use resttest_fs::FileSystem;
use resttest_model::{Descriptor, DescriptorOutcome};
use resttest_selectors::{FilePatternFilter, Selector, TagManager};
use resttest_transport::HttpTransport;

use crate::examiner::{examine, CaseStatus};
use crate::loader::{Loader, DEFAULT_FILE_SUFFIX_RE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub pending: usize,
    pub skipped: usize,
    pub success: usize,
    pub failure: usize,
    pub cracked: usize,
}

impl Counters {
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending + self.skipped + self.success + self.failure + self.cracked
    }

    /// Exit code driver: any failure or crash makes the whole run a failure (§4.8).
    #[must_use]
    pub fn any_red(&self) -> bool {
        self.failure > 0 || self.cracked > 0
    }
}

/// A single case's reported outcome, carried alongside enough context to
/// render it (file, title, tags).
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub file: Utf8PathBuf,
    pub title: String,
    pub tags: Vec<String>,
    pub status: CaseStatus,
    pub duration: Duration,
    pub errors: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total_files: usize,
    pub total_cases: usize,
    pub counters: Counters,
    pub elapsed: Duration,
    pub load_errors: Vec<String>,
    pub cases: Vec<CaseReport>,
}

/// Executes the run pipeline of §4.8: load, partition, filter, examine,
/// summarize. Grounded on `engine/TestRunner.go`'s sequential-per-suite
/// loop, generalized to this domain's descriptor/case vocabulary.
pub struct RunController<'a> {
    fs: &'a dyn FileSystem,
    transport: &'a dyn HttpTransport,
}

impl<'a> RunController<'a> {
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, transport: &'a dyn HttpTransport) -> Self {
        RunController { fs, transport }
    }

    pub async fn run(
        &self,
        test_dirs: &[Utf8PathBuf],
        file_filter: &FilePatternFilter,
        selector: &Selector,
        tag_manager: &TagManager,
    ) -> RunSummary {
        let start = Instant::now();

        let loader = Loader::new(self.fs);
        let descriptors = loader.load_dirs(test_dirs, DEFAULT_FILE_SUFFIX_RE);

        let (valid, invalid): (Vec<Descriptor>, Vec<Descriptor>) =
            descriptors.into_iter().partition(Descriptor::is_valid);

        let load_errors = invalid
            .iter()
            .map(|d| match &d.outcome {
                DescriptorOutcome::Failed(message) => {
                    format!("{}: {message}", d.locator.relative_to_cwd)
                }
                DescriptorOutcome::Loaded(_) => unreachable!("partitioned as invalid"),
            })
            .collect();

        let accepted: Vec<&Descriptor> = valid
            .iter()
            .filter(|d| file_filter.accepts(&d.locator.relative_to_cwd))
            .collect();

        let mut counters = Counters::default();
        let mut cases = Vec::new();
        let mut cache = RestCache::new();

        for descriptor in &accepted {
            let Some(suite) = descriptor.suite() else { continue };
            for (case, effective_pending) in suite.iter_cases_with_pending() {
                if effective_pending {
                    counters.pending += 1;
                    cases.push(CaseReport {
                        file: descriptor.locator.relative_to_cwd.clone(),
                        title: case.title.clone(),
                        tags: case.tags.clone(),
                        status: CaseStatus::Pending,
                        duration: Duration::ZERO,
                        errors: Default::default(),
                    });
                    continue;
                }

                if !selector.is_matched(&case.title) {
                    counters.skipped += 1;
                    continue;
                }

                let (active, _annotations) = tag_manager.is_active(&case.tags);
                if !active {
                    counters.skipped += 1;
                    continue;
                }

                let result = examine(case, false, &mut cache, self.transport).await;
                match result.status {
                    CaseStatus::Pending => counters.pending += 1,
                    CaseStatus::Ok => counters.success += 1,
                    CaseStatus::Error => {
                        if result.errors.contains_key("HttpClient") || result.errors.keys().any(|k| k.starts_with("Template")) {
                            counters.cracked += 1;
                        } else {
                            counters.failure += 1;
                        }
                    }
                }

                cases.push(CaseReport {
                    file: descriptor.locator.relative_to_cwd.clone(),
                    title: case.title.clone(),
                    tags: case.tags.clone(),
                    status: result.status,
                    duration: result.duration,
                    errors: result.errors,
                });
            }
        }

        let elapsed = start.elapsed();
        tracing::info!(
            total_files = accepted.len(),
            total_cases = cases.len(),
            success = counters.success,
            failure = counters.failure,
            cracked = counters.cracked,
            pending = counters.pending,
            skipped = counters.skipped,
            elapsed_ms = elapsed.as_millis() as u64,
            "run complete"
        );

        RunSummary {
            total_files: accepted.len(),
            total_cases: cases.len(),
            counters,
            elapsed,
            load_errors,
            cases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use resttest_fs::InMemoryFileSystem;
    use resttest_model::{HttpRequest, HttpResponse};
    use resttest_transport::TransportError;

    struct StubTransport;

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn do_request(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse {
                status_code: 200,
                status: "200 OK".to_string(),
                version: "HTTP/1.1".to_string(),
                headers: vec![],
                body: b"{}".to_vec(),
            })
        }
    }

    #[tokio::test]
    async fn pipeline_counts_pending_skipped_and_success() {
        let mut fs = InMemoryFileSystem::new().with_cwd("/work");
        fs.add_file(
            "/work/suites/a.yaml",
            "testcases:\n  - title: Ping\n  - title: Slow case\n    pending: true\n",
        );

        let transport = StubTransport;
        let controller = RunController::new(&fs, &transport);
        let summary = controller
            .run(
                &[Utf8PathBuf::from("/work/suites")],
                &FilePatternFilter::default(),
                &Selector::new(""),
                &TagManager::new(&[]),
            )
            .await;

        assert_eq!(summary.counters.success, 1);
        assert_eq!(summary.counters.pending, 1);
        assert!(!summary.counters.any_red());
    }

    #[tokio::test]
    async fn unmatched_selector_is_skipped_not_failed() {
        let mut fs = InMemoryFileSystem::new().with_cwd("/work");
        fs.add_file("/work/suites/a.yaml", "testcases:\n  - title: Ping\n");

        let transport = StubTransport;
        let controller = RunController::new(&fs, &transport);
        let summary = controller
            .run(
                &[Utf8PathBuf::from("/work/suites")],
                &FilePatternFilter::default(),
                &Selector::new("pong"),
                &TagManager::new(&[]),
            )
            .await;

        assert_eq!(summary.counters.skipped, 1);
        assert_eq!(summary.counters.success, 0);
    }

    #[tokio::test]
    async fn invalid_suite_is_reported_without_aborting_the_run() {
        let mut fs = InMemoryFileSystem::new().with_cwd("/work");
        fs.add_file("/work/suites/a.yaml", "testcases:\n  - title: Ping\n");
        fs.add_file("/work/suites/bad.yaml", "testcases:\n  - title: 123\n");

        let transport = StubTransport;
        let controller = RunController::new(&fs, &transport);
        let summary = controller
            .run(
                &[Utf8PathBuf::from("/work/suites")],
                &FilePatternFilter::default(),
                &Selector::new(""),
                &TagManager::new(&[]),
            )
            .await;

        assert_eq!(summary.counters.success, 1);
        assert_eq!(summary.load_errors.len(), 1);
    }
}
