//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Shomer - PII detection and anonymization tool
#[derive(Parser, Debug)]
#[command(name = "shomer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shomer.toml", env = "SHOMER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHOMER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan documents for PII, assess risk, and produce anonymized copies
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["shomer", "scan", "input.txt"]);
        assert_eq!(cli.config, "shomer.toml");
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["shomer", "--config", "custom.toml", "scan", "input.txt"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["shomer", "--log-level", "debug", "scan", "input.txt"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_scan_flags() {
        let cli = Cli::parse_from(["shomer", "scan", "--consent", "--json", "a.txt", "b.txt"]);
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.consent);
                assert!(args.json);
                assert_eq!(args.inputs.len(), 2);
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_cli_parse_scan_dry_run() {
        let cli = Cli::parse_from(["shomer", "scan", "--dry-run", "a.txt"]);
        match cli.command {
            Commands::Scan(args) => assert!(args.dry_run),
            _ => panic!("expected scan command"),
        }

        // Writing anonymized copies contradicts a dry run
        assert!(Cli::try_parse_from([
            "shomer", "scan", "--dry-run", "--out-dir", "out", "a.txt"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["shomer", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["shomer", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
