//! Process exit codes.
//!
//! Mirrors the teacher crate's `ExitCode(i32)` newtype: a small set of named
//! constants rather than bare `i32` literals scattered through the CLI layer.

/// A process exit code, restricted to the three values this tool ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// All suites loaded, every executed case passed.
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one case failed its expectations or crashed during execution.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Bad CLI arguments, unreadable configuration, or no resolvable test directories.
    pub const MISCONFIGURATION: ExitCode = ExitCode(2);

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_zero() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
    }

    #[test]
    fn failure_and_misconfiguration_are_distinct() {
        assert_ne!(ExitCode::FAILURE, ExitCode::MISCONFIGURATION);
        assert_eq!(ExitCode::FAILURE.as_i32(), 1);
        assert_eq!(ExitCode::MISCONFIGURATION.as_i32(), 2);
    }
}
