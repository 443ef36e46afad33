// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{DEFAULT_PRAGMA_VALUE, DEFAULT_USER_AGENT};
use crate::logging::LogFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Scanner settings, loaded from an optional YAML file and overridden by
/// command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Request timeout in seconds. Absent means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Value sent in the `Pragma` request header
    #[serde(default = "default_pragma")]
    pub pragma: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_pragma() -> String {
    DEFAULT_PRAGMA_VALUE.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
            pragma: default_pragma(),
            log_format: LogFormat::default(),
        }
    }
}

impl ScanConfig {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // Every referenced variable must exist before substituting
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            if std::env::var(var_name).is_err() {
                return Err(ConfigError::MissingEnvVar(var_name.to_string()));
            }
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        // An empty or comment-only file is a YAML null document: all defaults
        if substituted.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(&substituted)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0 (omit it to disable the timeout)".to_string(),
            ));
        }

        if self.pragma.trim().is_empty() {
            return Err(ConfigError::Invalid("pragma cannot be empty".to_string()));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
