//! Configuration for synthesis tools.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with HTS_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::passes::TwoQubitBasis;
use crate::synthesis::Strategy;

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synthesis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Engine: "exact" or "elimination"
    #[serde(default)]
    pub strategy: Strategy,

    /// Native two-qubit gate: "cx" or "cz"
    #[serde(default)]
    pub two_qubit_gate: TwoQubitBasis,

    /// Remove adjacent self-inverse gate pairs after synthesis
    #[serde(default = "default_true")]
    pub cancel_inverses: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            strategy: Strategy::default(),
            two_qubit_gate: TwoQubitBasis::default(),
            cancel_inverses: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_yaml_ng::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::default().merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `HTS_*` environment variables into this configuration.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from `lookup`, keyed by environment variable name.
    /// Absent keys leave the corresponding fields unchanged.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("HTS_STRATEGY") {
            self.synthesis.strategy = v
                .parse()
                .map_err(|e| ConfigError::ValidationError(format!("HTS_STRATEGY: {e}")))?;
        }
        if let Some(v) = lookup("HTS_TWO_QUBIT_GATE") {
            self.synthesis.two_qubit_gate = v
                .parse()
                .map_err(|e| ConfigError::ValidationError(format!("HTS_TWO_QUBIT_GATE: {e}")))?;
        }
        if let Some(v) = lookup("HTS_CANCEL_INVERSES") {
            self.synthesis.cancel_inverses = match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "HTS_CANCEL_INVERSES: expected a boolean, got '{other}'"
                    )));
                }
            };
        }
        if let Some(v) = lookup("HTS_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {other}"
            ))),
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml_ng::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.synthesis.strategy, Strategy::Exact);
        assert_eq!(config.synthesis.two_qubit_gate, TwoQubitBasis::Cx);
        assert!(config.synthesis.cancel_inverses);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml("synthesis:\n  two_qubit_gate: cz\n").unwrap();
        assert_eq!(config.synthesis.two_qubit_gate, TwoQubitBasis::Cz);
        assert_eq!(config.synthesis.strategy, Strategy::Exact);
        assert!(config.synthesis.cancel_inverses);
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let mut config = Config::default();
        config.synthesis.strategy = Strategy::Elimination;
        config.synthesis.cancel_inverses = false;
        config.logging.level = "debug".to_string();
        let text = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_yaml("synthesis:\n  strategy: annealing\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars = |key: &str| match key {
            "HTS_STRATEGY" => Some("elimination".to_string()),
            "HTS_CANCEL_INVERSES" => Some("off".to_string()),
            "HTS_LOG_LEVEL" => Some("info".to_string()),
            _ => None,
        };
        let config = Config::default().merge_vars(vars).unwrap();
        assert_eq!(config.synthesis.strategy, Strategy::Elimination);
        assert_eq!(config.synthesis.two_qubit_gate, TwoQubitBasis::Cx);
        assert!(!config.synthesis.cancel_inverses);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_env_override() {
        let vars = |key: &str| (key == "HTS_TWO_QUBIT_GATE").then(|| "iswap".to_string());
        assert!(matches!(
            Config::default().merge_vars(vars),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_file("/nonexistent/hts/config.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
