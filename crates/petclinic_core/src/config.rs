//! Runtime configuration for the clinic core.
//!
//! # Responsibility
//! - Load `ClinicConfig` from an optional JSON file.
//! - Apply `PETCLINIC_*` environment overrides on top of file values.
//!
//! # Invariants
//! - Every field has a default, so an empty object is a valid config.
//! - A missing `database.path` leaves the storage choice to the front end.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DB_PATH: &str = "PETCLINIC_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "PETCLINIC_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PETCLINIC_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path; `None` when the front end picks its own default.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

impl ClinicConfig {
    /// Loads the file at `path` (or defaults) and applies process env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.logging.dir = Some(PathBuf::from(dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClinicConfig, ConfigError, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn empty_object_yields_defaults() {
        let config: ClinicConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClinicConfig::default());
        assert!(config.database.path.is_none());
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"database":{{"path":"/var/lib/petclinic.db"}},"logging":{{"level":"warn"}}}}"#
        )
        .unwrap();

        let config = ClinicConfig::from_json_file(file.path()).unwrap();
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/var/lib/petclinic.db"))
        );
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ClinicConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_replace_file_values_and_skip_blanks() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_DB_PATH, "/tmp/clinic.db"), (ENV_LOG_LEVEL, "  ")]);
        let mut config = ClinicConfig::default();
        let level_before = config.logging.level.clone();

        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/clinic.db")));
        assert_eq!(config.logging.level, level_before);
    }
}
