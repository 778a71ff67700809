//! Configuration schema types
//!
//! This module defines the configuration structure for n2md. Every section has
//! defaults so the exporter can run from environment variables alone.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main n2md configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Notion API settings
    #[serde(default)]
    pub notion: NotionConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.notion.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Whether files should be rendered without being written
    pub fn is_dry_run(&self) -> bool {
        self.application.dry_run || self.export.dry_run
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (render pages but don't write files)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt of a request
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Notion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Database to export
    #[serde(default)]
    pub database_id: String,

    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size for paginated endpoints (the API caps it at 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl NotionConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("notion.api_key cannot be empty (set NOTION_KEY)".to_string());
        }

        if self.database_id.trim().is_empty() {
            return Err("notion.database_id cannot be empty (set NOTION_DATABASE_ID)".to_string());
        }

        match url::Url::parse(&self.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => {
                return Err("notion.base_url must start with http:// or https://".to_string());
            }
            Err(e) => {
                return Err(format!("notion.base_url is not a valid URL: {e}"));
            }
        }

        if self.notion_version.trim().is_empty() {
            return Err("notion.notion_version cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("notion.timeout_seconds must be greater than 0".to_string());
        }

        if !(1..=100).contains(&self.page_size) {
            return Err(format!(
                "notion.page_size must be between 1 and 100, got {}",
                self.page_size
            ));
        }

        if self.retry.max_retries > 10 {
            return Err(format!(
                "notion.retry.max_retries must be <= 10, got {}",
                self.retry.max_retries
            ));
        }

        Ok(())
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database_id: String::new(),
            base_url: default_base_url(),
            notion_version: default_notion_version(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            retry: RetryConfig::default(),
        }
    }
}

/// Skipping of pages flagged by a checkbox column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreezeConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Checkbox column marking a page as frozen
    #[serde(default)]
    pub column: Option<String>,
}

/// Partitioning of the output directory by a language column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Column holding the page language
    #[serde(default)]
    pub column: Option<String>,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory that receives the Markdown files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Columns copied into the frontmatter (all columns when unset)
    #[serde(default)]
    pub frontmatter_columns: Option<Vec<String>>,

    /// Column holding the page title
    #[serde(default = "default_title_column")]
    pub title_column: String,

    /// Stop at the first failing page instead of reporting and continuing
    #[serde(default)]
    pub fail_fast: bool,

    /// Render pages but don't write files
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub freeze: FreezeConfig,

    #[serde(default)]
    pub language: LanguageConfig,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.title_column.is_empty() {
            return Err("export.title_column cannot be empty".to_string());
        }

        if let Some(columns) = &self.frontmatter_columns {
            if columns.is_empty() {
                return Err(
                    "export.frontmatter_columns cannot be an empty list; omit it to export all columns"
                        .to_string(),
                );
            }
        }

        if self.freeze.enabled && column_missing(&self.freeze.column) {
            return Err(
                "export.freeze.column is required when freeze is enabled (set COL_FREEZE)"
                    .to_string(),
            );
        }

        if self.language.enabled && column_missing(&self.language.column) {
            return Err(
                "export.language.column is required when language partitioning is enabled (set COL_LANG)"
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            frontmatter_columns: None,
            title_column: default_title_column(),
            fail_fast: false,
            dry_run: false,
            freeze: FreezeConfig::default(),
            language: LanguageConfig::default(),
        }
    }
}

fn column_missing(column: &Option<String>) -> bool {
    column.as_deref().map(str::is_empty).unwrap_or(true)
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to the console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> u32 {
    100
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_output_dir() -> String {
    "./output".to_string()
}

fn default_title_column() -> String {
    "title".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> ExporterConfig {
        let mut config = ExporterConfig::default();
        config.notion.api_key = Some(secret_string("secret_abc".to_string()));
        config.notion.database_id = "db-123".to_string();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_notion_config_requires_credentials() {
        let mut config = valid_config();
        config.notion.api_key = None;
        let err = config.validate().unwrap_err();
        assert!(err.contains("api_key"));

        let mut config = valid_config();
        config.notion.api_key = Some(secret_string(String::new()));
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.notion.database_id = "  ".to_string();
        assert!(config.validate().unwrap_err().contains("database_id"));
    }

    #[test]
    fn test_notion_config_base_url() {
        let mut config = valid_config();
        config.notion.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.notion.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.notion.base_url = "http://127.0.0.1:1234".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_notion_config_limits() {
        let mut config = valid_config();
        config.notion.page_size = 0;
        assert!(config.validate().is_err());

        config.notion.page_size = 101;
        assert!(config.validate().is_err());

        config.notion.page_size = 100;
        config.notion.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.notion.timeout_seconds = 30;
        config.notion.retry.max_retries = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_requires_columns_for_modes() {
        let mut config = valid_config();
        config.export.freeze.enabled = true;
        assert!(config.validate().unwrap_err().contains("freeze.column"));

        config.export.freeze.column = Some("Frozen".to_string());
        assert!(config.validate().is_ok());

        config.export.language.enabled = true;
        config.export.language.column = Some(String::new());
        assert!(config.validate().unwrap_err().contains("language.column"));
    }

    #[test]
    fn test_export_config_rejects_empty_column_list() {
        let mut config = valid_config();
        config.export.frontmatter_columns = Some(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dry_run_from_either_section() {
        let mut config = valid_config();
        assert!(!config.is_dry_run());
        config.export.dry_run = true;
        assert!(config.is_dry_run());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_base_url(), "https://api.notion.com");
        assert_eq!(default_notion_version(), "2022-06-28");
        assert_eq!(default_page_size(), 100);
        assert_eq!(default_output_dir(), "./output");
        assert_eq!(default_title_column(), "title");
        assert_eq!(default_max_retries(), 3);
    }
}
