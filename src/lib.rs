//! resttest - a declarative HTTP API test runner.
//!
//! Suites are YAML/JSON documents describing requests and expectations;
//! this crate loads them, runs them against a live transport, and reports
//! pass/fail per case. The core pipeline (loader, examiner, evaluator,
//! template engine) lives in the `resttest-*` workspace crates; this crate
//! is the CLI surface that drives them.

pub mod cli;

pub use resttest_config::{CliArgs, Config, ConfigSource};
pub use resttest_utils::{ExitCode, RestTestError};
