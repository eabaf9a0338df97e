//! Configuration schema types

use crate::domain::AnonymizationMode;
use crate::risk::RiskConfig;
use serde::{Deserialize, Serialize};

/// Main configuration
///
/// This is the root structure that maps to the TOML file. Every section has
/// defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShomerConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Detection settings
    pub detection: DetectionConfig,

    /// Anonymization settings
    pub anonymization: AnonymizationConfig,

    /// Risk scoring weights and thresholds
    pub risk: RiskConfig,

    /// Audit trail configuration
    pub audit: AuditConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ShomerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization.validate()?;
        self.risk.validate().map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Detection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Path to a pattern library TOML file; the embedded default library
    /// is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_file: Option<String>,
}

/// Anonymization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnonymizationConfig {
    /// Rewrite strategy (redact, mask, replace, hash)
    pub mode: AnonymizationMode,

    /// Symbol used by the mask strategy
    pub mask_symbol: String,

    /// Salt mixed into hash tokens; required for the hash strategy
    pub hash_salt: String,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            mode: AnonymizationMode::Redact,
            mask_symbol: "*".to_string(),
            hash_salt: String::new(),
        }
    }
}

impl AnonymizationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mask_symbol.chars().count() != 1 {
            return Err(format!(
                "mask_symbol must be a single character, got '{}'",
                self.mask_symbol
            ));
        }
        if self.mode == AnonymizationMode::Hash && self.hash_salt.is_empty() {
            return Err("hash_salt is required when anonymization mode is 'hash'".to_string());
        }
        Ok(())
    }

    /// The configured mask symbol as a char
    pub fn mask_char(&self) -> char {
        // validate() guarantees exactly one char
        self.mask_symbol.chars().next().unwrap_or('*')
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable the append-only JSONL audit log
    pub enabled: bool,

    /// Audit log file path
    pub log_path: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: "logs/audit.jsonl".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write structured JSON logs to a local rolling file
    pub local_enabled: bool,

    /// Directory for local log files
    pub local_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "logs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ShomerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = ShomerConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hash_mode_requires_salt() {
        let mut config = ShomerConfig::default();
        config.anonymization.mode = AnonymizationMode::Hash;
        assert!(config.validate().is_err());

        config.anonymization.hash_salt = "pepper".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_multi_char_mask_symbol_rejected() {
        let mut config = ShomerConfig::default();
        config.anonymization.mask_symbol = "**".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_parses_with_defaults() {
        let config: ShomerConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.anonymization.mode, AnonymizationMode::Redact);
        assert!(!config.audit.enabled);
    }
}
