//! CLI entry point and dispatch logic.
//!
//! Owns the `run()` function: parses arguments, builds a tokio runtime,
//! dispatches to command handlers, and maps errors to exit codes. All
//! output, including errors, is handled here; `main.rs` only exits.

use clap::Parser;
use resttest_utils::ExitCode;

use super::args::{Cli, Commands};
use super::commands::{self, RunArgs};

pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    resttest_utils::logging::init(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ failed to create async runtime: {e}");
            return Err(ExitCode::FAILURE);
        }
    };

    rt.block_on(async {
        match cli.command {
            Commands::Run { config_path, test_dirs, incl_files, excl_files, test_name, tags, no_color } => {
                commands::execute_run_command(RunArgs {
                    config_path,
                    test_dirs,
                    incl_files,
                    excl_files,
                    test_name,
                    tags,
                    no_color,
                })
                .await
            }
            Commands::Gen(gen_cmd) => commands::execute_gen_curl_command(gen_cmd).await,
            Commands::Req(req_cmd) => commands::execute_req_curl_command(req_cmd).await,
        }
    })
}
