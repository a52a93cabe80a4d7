//! CLI argument definitions and parsing structures.
//!
//! Defines the command-line interface using clap, mirroring the external
//! interfaces of §6: `run`, `gen curl`, `req curl`.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// resttest - a declarative HTTP API test runner
#[derive(Parser)]
#[command(name = "resttest")]
#[command(about = "Runs declarative HTTP API test suites")]
#[command(long_about = r#"
resttest executes YAML/JSON suite documents describing HTTP requests and
their expected responses, with cross-case response captures and a
comparison algebra over status code, headers, and body.

EXAMPLES:
  # Run every suite under ./suites
  resttest run -d suites

  # Run only cases whose title contains "login", tagged smoke but not slow
  resttest run -d suites -n login -g +smoke,-slow

  # Print the curl invocation for a single uniquely-selected case
  resttest gen curl -d suites -n "Login flow"

  # Fire a one-off request directly and dump the exchange
  resttest req curl -X POST --url http://localhost:8080/login -H 'Content-Type: application/json' -d '{"user":"a"}'

  # Same, but snapshot the exchange into a new suite document
  resttest req curl --url http://localhost:8080/ping --snapshot > suites/ping.yaml

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults.
  The config file is discovered by searching upward from the current
  directory for resttest.toml. Use --config-path to specify an explicit path.
"#)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run suites from the configured test directories.
    Run {
        /// Path to an explicit resttest.toml (overrides discovery).
        #[arg(long)]
        config_path: Option<Utf8PathBuf>,

        /// Directory to load suites from (repeatable).
        #[arg(short = 'd', long = "test-dirs")]
        test_dirs: Vec<Utf8PathBuf>,

        /// File inclusion pattern: suffix, glob, or regex (repeatable).
        #[arg(short = 'i', long = "incl-files")]
        incl_files: Vec<String>,

        /// File exclusion pattern: suffix, glob, or regex (repeatable).
        #[arg(short = 'e', long = "excl-files")]
        excl_files: Vec<String>,

        /// Only run cases whose title matches this pattern.
        #[arg(short = 'n', long = "test-name")]
        test_name: Option<String>,

        /// Signed tag expression, e.g. +smoke,-slow (repeatable).
        #[arg(short = 'g', long = "tags")]
        tags: Vec<String>,

        /// Disable colorized output.
        #[arg(long)]
        no_color: bool,
    },
    /// Generation commands.
    Gen(GenCommands),
    /// Direct request commands.
    Req(ReqCommands),
}

#[derive(Subcommand)]
pub enum GenCommands {
    /// Print the equivalent curl invocation for a single selected case.
    Curl {
        #[arg(long)]
        config_path: Option<Utf8PathBuf>,
        #[arg(short = 'd', long = "test-dirs")]
        test_dirs: Vec<Utf8PathBuf>,
        #[arg(short = 'i', long = "incl-files")]
        incl_files: Vec<String>,
        #[arg(short = 'e', long = "excl-files")]
        excl_files: Vec<String>,
        #[arg(short = 'n', long = "test-name")]
        test_name: Option<String>,
        #[arg(short = 'g', long = "tags")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ReqCommands {
    /// Invoke a single request directly, optionally snapshotting it.
    Curl {
        /// HTTP method.
        #[arg(short = 'X', long = "method", default_value = "GET")]
        method: String,
        /// Target URL.
        #[arg(long)]
        url: String,
        /// Header as "Name: value" (repeatable).
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Request body.
        #[arg(short = 'd', long = "data")]
        data: Option<String>,
        /// Write a synthesized suite document to stdout instead of a dump.
        #[arg(long)]
        snapshot: bool,
        /// Title to give the synthesized case (snapshot mode only).
        #[arg(long, default_value = "Recorded request")]
        export_testcase: String,
    },
}
