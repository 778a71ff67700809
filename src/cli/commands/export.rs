//! Export command implementation
//!
//! This module implements the `export` command (also the default command)
//! that writes every page of the Notion database as a Markdown file.

use crate::cli::{
    EXIT_CONFIG, EXIT_CONNECTION, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_PARTIAL, EXIT_SUCCESS,
};
use crate::config::loader::parse_columns;
use crate::config::{load_config, ExporterConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::N2mdError;
use clap::Args;
use std::path::Path;
use tokio::sync::watch;

/// Number of failures listed on the console
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output directory (overrides OUTPUT_DIR and export.output_dir)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Frontmatter columns, comma-separated (default: all properties)
    #[arg(long, value_name = "COLUMNS")]
    pub columns: Option<String>,

    /// Dry run mode - resolve every page without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Stop starting new pages after the first failure
    #[arg(long)]
    pub fail_fast: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: Option<&Path>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        if config.is_dry_run() {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let coordinator = match ExportCoordinator::from_config(config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(exit_code_for_error(&e));
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for_error(&e));
            }
        };

        print_summary(&summary);
        Ok(exit_code_for_summary(&summary))
    }

    /// Apply command line overrides on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut ExporterConfig) {
        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }

        if let Some(columns) = &self.columns {
            let columns = parse_columns(columns);
            tracing::info!(columns = ?columns, "Overriding frontmatter columns from CLI");
            config.export.frontmatter_columns = columns;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        if self.fail_fast {
            tracing::info!("Enabling fail-fast mode from CLI");
            config.export.fail_fast = true;
        }
    }
}

/// Exit code for a fatal error
pub fn exit_code_for_error(error: &N2mdError) -> i32 {
    match error {
        N2mdError::Configuration(_) | N2mdError::Validation(_) => EXIT_CONFIG,
        N2mdError::Notion(_) => EXIT_CONNECTION,
        _ => EXIT_FATAL,
    }
}

/// Exit code for a completed run
pub fn exit_code_for_summary(summary: &ExportSummary) -> i32 {
    if summary.interrupted {
        EXIT_INTERRUPTED
    } else if summary.failed > 0 || summary.aborted {
        EXIT_PARTIAL
    } else {
        EXIT_SUCCESS
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Total Pages: {}", summary.total_pages);
    if summary.dry_run {
        println!("  Would Export: {}", summary.exported);
    } else {
        println!("  Exported: {}", summary.exported);
    }
    println!("  Skipped (frozen): {}", summary.skipped);
    println!("  Failed: {}", summary.failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.failures.is_empty() {
        println!("⚠️  Failures:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {failure}");
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }

    if summary.interrupted {
        println!("⚠️  Export interrupted. Pages already scheduled were written.");
    } else if summary.aborted {
        println!("⚠️  Export stopped after the first failure (fail-fast)");
    } else if summary.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with failures");
    }
}
