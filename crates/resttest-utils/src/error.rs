//! Error type for the CLI boundary.
//!
//! Configuration errors are the one class that needs to surface as a typed
//! `RestTestError` distinct from the engine's own per-case reporting: a run
//! that can't even resolve its test directories never reaches the examiner,
//! so there's no case-level error map to fold it into. `RestTestError`
//! follows the teacher's `XCheckerError` → `ExitCode` shape without carrying
//! over its much larger `UserFriendlyError` suggestion system.

use crate::exit_codes::ExitCode;

#[derive(Debug, thiserror::Error)]
pub enum RestTestError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RestTestError {
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            RestTestError::Config(_) => ExitCode::MISCONFIGURATION,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no test directories configured or resolvable")]
    NoTestDirs,
    #[error("failed to read configuration file {path}: {source}")]
    UnreadableFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    InvalidToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_misconfiguration() {
        let err = RestTestError::Config(ConfigError::NoTestDirs);
        assert_eq!(err.to_exit_code(), ExitCode::MISCONFIGURATION);
    }

    #[test]
    fn invalid_value_config_error_also_maps_to_misconfiguration() {
        let err = RestTestError::Config(ConfigError::InvalidValue {
            key: "test-dirs".to_string(),
            value: "".to_string(),
        });
        assert_eq!(err.to_exit_code(), ExitCode::MISCONFIGURATION);
    }
}
