//! Init command implementation
//!
//! Generates a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shomer.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Shomer configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set SHOMER_ANONYMIZATION_HASH_SALT if using hash mode");
                println!("  3. Validate configuration: shomer validate-config");
                println!("  4. Run a scan: shomer scan <files>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Shomer Configuration File
# PII detection and anonymization per the Privacy Protection Law (Amendment 13)

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[detection]
# Path to a pattern library TOML file; omit to use the embedded default
# pattern_file = "patterns/pii_patterns.toml"

[anonymization]
# Rewrite strategy: redact | mask | replace | hash
mode = "redact"

# Symbol used by the mask strategy
mask_symbol = "*"

# Salt mixed into hash tokens (required for hash mode)
# hash_salt = "${SHOMER_ANONYMIZATION_HASH_SALT}"

[risk]
# Cap on one category's total score contribution
per_category_cap = 30

# Penalty for specially sensitive data without consent
consent_penalty = 25

# Categories that force CRITICAL_VIOLATION regardless of score,
# e.g. ["ID_NUMBER", "CREDIT_CARD"]
always_critical = []

# Confidence discount for entities lacking pattern corroboration
uncorroborated_discount = 0.3

[risk.thresholds]
approved = 20
approved_with_conditions = 40
requires_changes = 65
rejected = 85

[audit]
# Append-only JSONL audit trail (PII values are hashed, never logged)
enabled = false
log_path = "logs/audit.jsonl"

[logging]
# Structured JSON log files in addition to console output
local_enabled = false
local_path = "logs"
"#
        .to_string()
    }
}
