//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Pattern Library: {}",
            config
                .detection
                .pattern_file
                .as_deref()
                .unwrap_or("(embedded default)")
        );
        println!("  Anonymization Mode: {}", config.anonymization.mode);
        println!("  Mask Symbol: {}", config.anonymization.mask_symbol);
        println!("  Audit Enabled: {}", config.audit.enabled);
        if config.audit.enabled {
            println!("  Audit Log: {}", config.audit.log_path);
        }
        println!(
            "  Always-Critical Categories: {:?}",
            config
                .risk
                .always_critical
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
        );
        println!(
            "  Decision Thresholds: {}/{}/{}/{}",
            config.risk.thresholds.approved,
            config.risk.thresholds.approved_with_conditions,
            config.risk.thresholds.requires_changes,
            config.risk.thresholds.rejected
        );
        println!();
        Ok(0)
    }
}
