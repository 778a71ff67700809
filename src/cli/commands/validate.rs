//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads and
//! validates the configuration and prints a redacted overview. With
//! `--check-connection` it also fetches the database schema from Notion.

use crate::adapters::notion::NotionClient;
use crate::cli::{EXIT_CONFIG, EXIT_CONNECTION, EXIT_SUCCESS};
use crate::config::{load_config, ExporterConfig};
use crate::domain::DatabaseId;
use clap::Args;
use secrecy::ExposeSecret;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Also query Notion for the database and its columns
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let source = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults and environment".to_string());
        tracing::info!(config = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        for line in overview(&config) {
            println!("  {line}");
        }
        println!();

        if !self.check_connection {
            return Ok(EXIT_SUCCESS);
        }

        check_connection(&config).await
    }
}

/// Redacted, human readable configuration lines
pub fn overview(config: &ExporterConfig) -> Vec<String> {
    let export = &config.export;
    let api_key = config
        .notion
        .api_key
        .as_ref()
        .map(|key| redact(key.expose_secret().as_ref()))
        .unwrap_or_else(|| "(not set)".to_string());

    let columns = export
        .frontmatter_columns
        .as_ref()
        .map(|c| c.join(", "))
        .unwrap_or_else(|| "(all properties)".to_string());

    let optional_column = |enabled: bool, column: &Option<String>| {
        if enabled {
            format!("on ({})", column.as_deref().unwrap_or_default())
        } else {
            "off".to_string()
        }
    };

    vec![
        format!("Log Level: {}", config.application.log_level),
        format!("Notion API: {}", config.notion.base_url),
        format!("Notion Version: {}", config.notion.notion_version),
        format!("API Key: {api_key}"),
        format!("Database: {}", config.notion.database_id),
        format!("Output Directory: {}", export.output_dir),
        format!("Frontmatter Columns: {columns}"),
        format!("Title Column: {}", export.title_column),
        format!(
            "Freeze Mode: {}",
            optional_column(export.freeze.enabled, &export.freeze.column)
        ),
        format!(
            "Language Mode: {}",
            optional_column(export.language.enabled, &export.language.column)
        ),
        format!("Fail Fast: {}", export.fail_fast),
        format!("Dry Run: {}", config.is_dry_run()),
    ]
}

/// Keeps the first characters of a token, masking the rest
fn redact(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    if token.chars().count() <= 6 {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

async fn check_connection(config: &ExporterConfig) -> anyhow::Result<i32> {
    println!("🔌 Checking Notion connection...");

    let database_id = match DatabaseId::new(config.notion.database_id.as_str()) {
        Ok(id) => id,
        Err(e) => {
            println!("❌ Invalid database id: {e}");
            return Ok(EXIT_CONFIG);
        }
    };

    let client = NotionClient::new(config.notion.clone())?;
    let database = match client.retrieve_database(&database_id).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Connection check failed");
            println!("❌ Could not read database: {e}");
            return Ok(EXIT_CONNECTION);
        }
    };

    println!("✅ Connected to database \"{}\"", database.title_text());
    let columns = database.columns();
    println!("  Columns:");
    for (name, kind) in &columns {
        println!("    - {name} ({kind})");
    }

    let missing = missing_columns(config, &columns);
    if missing.is_empty() {
        println!();
        return Ok(EXIT_SUCCESS);
    }

    println!();
    println!("❌ Configured columns not found in the database:");
    for column in &missing {
        println!("    - {column}");
    }
    Ok(EXIT_CONFIG)
}

/// Configured column names that the database schema does not have
pub fn missing_columns(config: &ExporterConfig, columns: &[(String, String)]) -> Vec<String> {
    let export = &config.export;
    let mut wanted: Vec<&str> = vec![export.title_column.as_str()];
    if let Some(configured) = &export.frontmatter_columns {
        wanted.extend(configured.iter().map(String::as_str));
    }
    if export.freeze.enabled {
        wanted.extend(export.freeze.column.as_deref());
    }
    if export.language.enabled {
        wanted.extend(export.language.column.as_deref());
    }

    let mut missing: Vec<String> = Vec::new();
    for name in wanted {
        if !columns.iter().any(|(c, _)| c == name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    missing
}
