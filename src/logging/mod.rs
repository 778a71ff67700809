//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human readable console output
//! - Configurable log levels (`--log-level`, `N2MD_LOG_LEVEL`, `RUST_LOG`)
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use n2md::logging::init_logging;
//! use n2md::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use n2md::log_export_start;
/// use n2md::domain::DatabaseId;
///
/// let database_id = DatabaseId::new("db-123").unwrap();
/// log_export_start!(&database_id, "./output");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($database_id:expr, $output_dir:expr) => {
        tracing::info!(
            database_id = %$database_id,
            output_dir = %$output_dir,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use n2md::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use n2md::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 500u64, "rate limited");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Retrying request"
        );
    };
}
