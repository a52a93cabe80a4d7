//! resttest CLI binary.
//!
//! This is the minimal entrypoint; all logic is in the library. main.rs only
//! invokes `cli::run()` and maps its result to a process exit code.

fn main() {
    if let Err(code) = resttest::cli::run() {
        std::process::exit(code.as_i32());
    }
}
