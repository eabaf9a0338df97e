//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ShomerConfig;
use crate::domain::{AnonymizationMode, Result, ShomerError};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ShomerConfig
/// 4. Applies environment variable overrides (SHOMER_* prefix)
/// 5. Validates the configuration
pub fn load_config(path: impl AsRef<Path>) -> Result<ShomerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShomerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShomerError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ShomerConfig = toml::from_str(&contents)
        .map_err(|e| ShomerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ShomerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Built-in defaults with environment overrides applied, for running
/// without a configuration file
pub fn default_config() -> Result<ShomerConfig> {
    let mut config = ShomerConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        ShomerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. A referenced variable that is not set
/// is a configuration error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| {
        ShomerError::Configuration(format!("invalid substitution pattern: {e}"))
    })?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ShomerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the SHOMER_* prefix
///
/// Variables follow the pattern SHOMER_<SECTION>_<KEY>, for example
/// SHOMER_ANONYMIZATION_MODE or SHOMER_AUDIT_ENABLED.
fn apply_env_overrides(config: &mut ShomerConfig) {
    if let Ok(val) = std::env::var("SHOMER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("SHOMER_DETECTION_PATTERN_FILE") {
        config.detection.pattern_file = Some(val);
    }

    if let Ok(val) = std::env::var("SHOMER_ANONYMIZATION_MODE") {
        if let Some(mode) = parse_mode(&val) {
            config.anonymization.mode = mode;
        }
    }
    if let Ok(val) = std::env::var("SHOMER_ANONYMIZATION_MASK_SYMBOL") {
        config.anonymization.mask_symbol = val;
    }
    if let Ok(val) = std::env::var("SHOMER_ANONYMIZATION_HASH_SALT") {
        config.anonymization.hash_salt = val;
    }

    if let Ok(val) = std::env::var("SHOMER_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHOMER_AUDIT_LOG_PATH") {
        config.audit.log_path = val;
    }

    if let Ok(val) = std::env::var("SHOMER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHOMER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

fn parse_mode(value: &str) -> Option<AnonymizationMode> {
    match value.to_lowercase().as_str() {
        "redact" => Some(AnonymizationMode::Redact),
        "mask" => Some(AnonymizationMode::Mask),
        "replace" => Some(AnonymizationMode::Replace),
        "hash" => Some(AnonymizationMode::Hash),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SHOMER_TEST_SUBST_VAR", "pepper");
        let input = "hash_salt = \"${SHOMER_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "hash_salt = \"pepper\"\n");
        std::env::remove_var("SHOMER_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SHOMER_TEST_MISSING_VAR");
        let input = "hash_salt = \"${SHOMER_TEST_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_comments_are_not_substituted() {
        let input = "# uses ${SHOMER_NOT_SET_ANYWHERE}\nmask_symbol = \"*\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${SHOMER_NOT_SET_ANYWHERE}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r##"
[application]
log_level = "debug"

[anonymization]
mode = "mask"
mask_symbol = "#"

[audit]
enabled = true
log_path = "audit/trail.jsonl"
"##;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.anonymization.mask_char(), '#');
        assert!(config.audit.enabled);
    }

    #[test]
    fn test_load_config_invalid_values_rejected() {
        let toml_content = r#"
[anonymization]
mode = "hash"
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        // hash mode without a salt fails validation
        assert!(load_config(temp_file.path()).is_err());
    }
}
