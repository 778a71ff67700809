// n2md - Notion database to Markdown exporter
// Copyright (c) 2025 n2md Contributors
// Licensed under the MIT License

use clap::Parser;
use n2md::cli::commands::export::exit_code_for_error;
use n2md::cli::{Cli, Commands, EXIT_FATAL};
use n2md::config::{load_config_unvalidated, LoggingConfig};
use n2md::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging settings come from the file and environment; errors in the
    // rest of the configuration are reported by the command itself
    let preloaded = load_config_unvalidated(cli.config_path()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| preloaded.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = preloaded.map(|c| c.logging).unwrap_or_else(LoggingConfig::default);

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code_for_error(&e));
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "n2md - Notion database to Markdown exporter"
    );

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn signal handler task
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                    println!("\n⚠️  Shutdown signal received, finishing pending writes...");
                    let _ = shutdown_tx.send(true);
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                    println!("\n⚠️  Shutdown signal received, finishing pending writes...");
                    let _ = shutdown_tx.send(true);
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                println!("\n⚠️  Shutdown signal received, finishing pending writes...");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // Flush file logs before exiting
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Some(Commands::Export(args)) => args.execute(cli.config_path(), shutdown_signal).await,
        Some(Commands::ValidateConfig(args)) => args.execute(cli.config_path()).await,
        None => cli.export.execute(cli.config_path(), shutdown_signal).await,
    }
}
