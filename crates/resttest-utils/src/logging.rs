//! Structured logging initialization.
//!
//! Grounded on the teacher's `init_tracing`: an `EnvFilter`-driven subscriber
//! with a compact `fmt` layer. The teacher's redaction, percentile-timing, and
//! doctor-report helpers are domain-specific to LLM orchestration and are not
//! carried forward here (see DESIGN.md).

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// `verbose` raises the default level from `info` to `debug`. `RUST_LOG`
/// always takes precedence when set, matching the teacher's convention.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = fmt().with_env_filter(filter).with_target(false).compact();

    // A second call to `init` (e.g. across repeated test invocations in the
    // same process) is a no-op, not a panic.
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic_when_called_twice() {
        init(false);
        init(true);
    }
}
