//! Hierarchical configuration with discovery and precedence: CLI > file >
//! defaults. Mirrors the teacher's `Config::discover` shape (`src/config.rs`)
//! scoped to this domain's `run` flags (§6).

use std::collections::HashMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use resttest_utils::ConfigError;
use serde::Deserialize;

const CONFIG_FILENAME: &str = "resttest.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    ConfigFile,
    Defaults,
}

/// Resolved configuration for the `run` / `gen curl` commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub test_dirs: Vec<Utf8PathBuf>,
    pub incl_files: Vec<String>,
    pub excl_files: Vec<String>,
    pub test_name: Option<String>,
    pub tags: Vec<String>,
    pub no_color: bool,
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_dirs: vec![Utf8PathBuf::from(".")],
            incl_files: Vec::new(),
            excl_files: Vec::new(),
            test_name: None,
            tags: Vec::new(),
            no_color: false,
            source_attribution: HashMap::new(),
        }
    }
}

/// Flags supplied on the command line; an absent/empty field defers to the
/// config file, which in turn defers to built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<Utf8PathBuf>,
    pub test_dirs: Vec<Utf8PathBuf>,
    pub incl_files: Vec<String>,
    pub excl_files: Vec<String>,
    pub test_name: Option<String>,
    pub tags: Vec<String>,
    pub no_color: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct TomlConfig {
    #[serde(default)]
    test_dirs: Vec<String>,
    #[serde(default)]
    incl_files: Vec<String>,
    #[serde(default)]
    excl_files: Vec<String>,
    #[serde(default)]
    test_name: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    no_color: Option<bool>,
}

impl Config {
    /// Discover and load configuration rooted at the current directory.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| ConfigError::UnreadableFile {
            path: ".".to_string(),
            source: e,
        })?;
        let start_dir = Utf8PathBuf::try_from(start_dir).map_err(|_| ConfigError::InvalidValue {
            key: "cwd".to_string(),
            value: "not valid UTF-8".to_string(),
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Path-driven variant used by tests to avoid process-global state.
    pub fn discover_from(start_dir: &Utf8Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut source_attribution = HashMap::new();
        let mut config = Config::default();
        for key in ["test_dirs", "incl_files", "excl_files", "test_name", "tags", "no_color"] {
            source_attribution.insert(key.to_string(), ConfigSource::Defaults);
        }

        let config_path = match &cli_args.config_path {
            Some(path) => Some(path.clone()),
            None => discover_config_file(start_dir),
        };

        if let Some(path) = &config_path {
            let raw = fs::read_to_string(path).map_err(|e| ConfigError::UnreadableFile {
                path: path.to_string(),
                source: e,
            })?;
            let toml_config: TomlConfig = toml::from_str(&raw).map_err(|e| ConfigError::InvalidToml {
                path: path.to_string(),
                source: e,
            })?;

            if !toml_config.test_dirs.is_empty() {
                config.test_dirs = toml_config.test_dirs.into_iter().map(Utf8PathBuf::from).collect();
                source_attribution.insert("test_dirs".to_string(), ConfigSource::ConfigFile);
            }
            if !toml_config.incl_files.is_empty() {
                config.incl_files = toml_config.incl_files;
                source_attribution.insert("incl_files".to_string(), ConfigSource::ConfigFile);
            }
            if !toml_config.excl_files.is_empty() {
                config.excl_files = toml_config.excl_files;
                source_attribution.insert("excl_files".to_string(), ConfigSource::ConfigFile);
            }
            if let Some(name) = toml_config.test_name {
                config.test_name = Some(name);
                source_attribution.insert("test_name".to_string(), ConfigSource::ConfigFile);
            }
            if !toml_config.tags.is_empty() {
                config.tags = toml_config.tags;
                source_attribution.insert("tags".to_string(), ConfigSource::ConfigFile);
            }
            if let Some(no_color) = toml_config.no_color {
                config.no_color = no_color;
                source_attribution.insert("no_color".to_string(), ConfigSource::ConfigFile);
            }
        }

        if !cli_args.test_dirs.is_empty() {
            config.test_dirs = cli_args.test_dirs.clone();
            source_attribution.insert("test_dirs".to_string(), ConfigSource::Cli);
        }
        if !cli_args.incl_files.is_empty() {
            config.incl_files = cli_args.incl_files.clone();
            source_attribution.insert("incl_files".to_string(), ConfigSource::Cli);
        }
        if !cli_args.excl_files.is_empty() {
            config.excl_files = cli_args.excl_files.clone();
            source_attribution.insert("excl_files".to_string(), ConfigSource::Cli);
        }
        if let Some(name) = &cli_args.test_name {
            config.test_name = Some(name.clone());
            source_attribution.insert("test_name".to_string(), ConfigSource::Cli);
        }
        if !cli_args.tags.is_empty() {
            config.tags = cli_args.tags.clone();
            source_attribution.insert("tags".to_string(), ConfigSource::Cli);
        }
        if cli_args.no_color {
            config.no_color = true;
            source_attribution.insert("no_color".to_string(), ConfigSource::Cli);
        }

        if config.test_dirs.is_empty() {
            return Err(ConfigError::NoTestDirs);
        }

        config.source_attribution = source_attribution;
        Ok(config)
    }
}

/// Walks upward from `start_dir` looking for `resttest.toml`, the way the
/// teacher's `discover_config_file_from` walks for `.xchecker/config.toml`.
fn discover_config_file(start_dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_with_no_file_and_no_cli() {
        let dir = TempDir::new().unwrap();
        let start = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let config = Config::discover_from(&start, &CliArgs::default()).unwrap();
        assert_eq!(config.test_dirs, vec![Utf8PathBuf::from(".")]);
        assert_eq!(
            config.source_attribution.get("test_dirs"),
            Some(&ConfigSource::Defaults)
        );
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let start = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs::write(
            start.join(CONFIG_FILENAME),
            "test-dirs = [\"suites\"]\nno-color = true\n",
        )
        .unwrap();

        let config = Config::discover_from(&start, &CliArgs::default()).unwrap();
        assert_eq!(config.test_dirs, vec![Utf8PathBuf::from("suites")]);
        assert!(config.no_color);
        assert_eq!(
            config.source_attribution.get("test_dirs"),
            Some(&ConfigSource::ConfigFile)
        );
    }

    #[test]
    fn cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let start = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs::write(start.join(CONFIG_FILENAME), "test-dirs = [\"suites\"]\n").unwrap();

        let cli_args = CliArgs {
            test_dirs: vec![Utf8PathBuf::from("overridden")],
            ..Default::default()
        };
        let config = Config::discover_from(&start, &cli_args).unwrap();
        assert_eq!(config.test_dirs, vec![Utf8PathBuf::from("overridden")]);
        assert_eq!(config.source_attribution.get("test_dirs"), Some(&ConfigSource::Cli));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let start = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs::write(start.join(CONFIG_FILENAME), "not valid [ toml").unwrap();

        let err = Config::discover_from(&start, &CliArgs::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { .. }));
    }
}
