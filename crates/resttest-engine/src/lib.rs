//! Loader, examiner, and the three CLI-facing controllers (run / generation /
//! request) that drive them (§4.1, §4.5, §4.8–§4.10).

pub mod examiner;
pub mod generator;
pub mod loader;
pub mod request;
pub mod run;

pub use examiner::{examine, CaseResult, CaseStatus};
pub use generator::{render_as_curl, GenerationController, GenerationError};
pub use loader::{Loader, DEFAULT_FILE_SUFFIX_RE};
pub use request::{header_vec, render_exchange, snapshot_expectation, RequestController};
pub use run::{CaseReport, Counters, RunController, RunSummary};
