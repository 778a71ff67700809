//! Configuration management for n2md.
//!
//! # Overview
//!
//! Configuration is layered:
//! - Built-in defaults, so a `.env` file alone is enough to run an export
//! - An optional TOML file (`n2md.toml` or `--config <path>`) with `${VAR_NAME}`
//!   substitution
//! - Environment variable overrides (`NOTION_KEY`, `NOTION_DATABASE_ID`,
//!   `OUTPUT_DIR`, `NOTION_FRONTMATTER_COLS`, `IS_FREEZE`, `COL_FREEZE`,
//!   `IS_LANG`, `COL_LANG`, ...)
//! - Command line overrides applied by the CLI
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run
//! - [`NotionConfig`] - API credentials, database, HTTP settings
//! - [`ExportConfig`] - Output directory, columns, freeze and language modes
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [notion]
//! api_key = "${NOTION_KEY}"
//! database_id = "668d797c76fa49349b05ad288df2d136"
//!
//! [export]
//! output_dir = "content/blog"
//! frontmatter_columns = ["title", "Slug", "Tags", "Date"]
//!
//! [export.freeze]
//! enabled = true
//! column = "Frozen"
//!
//! [export.language]
//! enabled = true
//! column = "Language"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_unvalidated};
pub use schema::{
    ApplicationConfig, ExportConfig, ExporterConfig, FreezeConfig, LanguageConfig,
    LoggingConfig, NotionConfig, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
