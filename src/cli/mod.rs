//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for n2md using clap.
//! Running `n2md` without a subcommand performs an export.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::Path;

/// Exit code: export completed without failures
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code: export completed but some pages failed
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code: invalid configuration
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: Notion could not be reached or the initial query failed
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code: any other fatal error
pub const EXIT_FATAL: i32 = 5;
/// Exit code: interrupted by SIGINT/SIGTERM
pub const EXIT_INTERRUPTED: i32 = 130;

/// n2md - Export a Notion database to Markdown files
#[derive(Parser, Debug)]
#[command(name = "n2md")]
#[command(version, about, long_about = None)]
#[command(author = "n2md Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to n2md.toml when present)
    #[arg(short, long, global = true, env = "N2MD_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "N2MD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute (export when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub export: commands::export::ExportArgs,
}

impl Cli {
    /// Configuration file path, if one was given
    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref().map(Path::new)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export all pages of the database (default)
    Export(commands::export::ExportArgs),

    /// Validate configuration and print a redacted overview
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default_export() {
        let cli = Cli::parse_from(["n2md"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.export.output_dir.is_none());
    }

    #[test]
    fn test_cli_parse_positional_output_dir() {
        let cli = Cli::parse_from(["n2md", "content/blog", "--dry-run"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.export.output_dir.as_deref(), Some("content/blog"));
        assert!(cli.export.dry_run);
    }

    #[test]
    fn test_cli_parse_export_subcommand() {
        let cli = Cli::parse_from(["n2md", "export", "out", "--columns", "title,Tags"]);
        match cli.command {
            Some(Commands::Export(args)) => {
                assert_eq!(args.output_dir.as_deref(), Some("out"));
                assert_eq!(args.columns.as_deref(), Some("title,Tags"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["n2md", "--config", "custom.toml"]);
        assert_eq!(cli.config_path(), Some(Path::new("custom.toml")));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["n2md", "--log-level", "debug", "--fail-fast"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(cli.export.fail_fast);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["n2md", "--config", "n2md.toml", "validate-config"]);
        assert!(matches!(cli.command, Some(Commands::ValidateConfig(_))));
        assert_eq!(cli.config.as_deref(), Some("n2md.toml"));
    }
}
