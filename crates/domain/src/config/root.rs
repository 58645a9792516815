use super::{AxfrConfig, ConfigError, LoggingConfig, OutputFormat, QueryConfig, TransferFailurePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub axfr: AxfrConfig,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub timeout_ms: Option<u64>,
    pub format: Option<OutputFormat>,
    pub skip_failed_zones: bool,
}

impl Config {
    /// Loads `config_path` if given (defaults otherwise) and applies overrides.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.query.timeout_ms = timeout_ms;
        }
        if let Some(format) = overrides.format {
            self.query.format = format;
        }
        if overrides.skip_failed_zones {
            self.axfr.on_failure = TransferFailurePolicy::SkipSubtree;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.query.default_server.trim().is_empty() {
            return Err(ConfigError::Validation(
                "query.default_server cannot be empty".to_string(),
            ));
        }
        if !LoggingConfig::is_valid_level(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}
