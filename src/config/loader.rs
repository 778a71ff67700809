//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use super::secret_string;
use crate::domain::errors::N2mdError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file picked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "n2md.toml";

/// Loads configuration
///
/// This function:
/// 1. Reads the TOML file (an explicit path must exist; without a path
///    `n2md.toml` is used when present, defaults otherwise)
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ExporterConfig
/// 4. Applies environment variable overrides (`NOTION_KEY`, `OUTPUT_DIR`, ...)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given file does not exist or cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use n2md::config::loader::load_config;
/// use std::path::Path;
///
/// let config = load_config(Some(Path::new("n2md.toml"))).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ExporterConfig> {
    let config = load_config_unvalidated(path)?;

    config
        .validate()
        .map_err(|e| N2mdError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Loads the file and environment layers without validating them
///
/// Used at startup to set up logging before validation errors are reported.
pub fn load_config_unvalidated(path: Option<&Path>) -> Result<ExporterConfig> {
    let mut config = read_config(path)?;
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Reads the TOML layer only, without environment overrides or validation
fn read_config(path: Option<&Path>) -> Result<ExporterConfig> {
    let path = match path {
        Some(path) => {
            let path = path.to_path_buf();
            if !path.exists() {
                return Err(N2mdError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE).to_path_buf();
            if !path.exists() {
                tracing::debug!("No configuration file found, using defaults and environment");
                return Ok(ExporterConfig::default());
            }
            path
        }
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        N2mdError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: ExporterConfig = toml::from_str(&contents)
        .map_err(|e| N2mdError::Configuration(format!("Failed to parse TOML: {e}")))?;

    tracing::debug!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| N2mdError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(N2mdError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Interprets a flag variable: empty, `0`, `false`, `no` and `off` are false,
/// anything else is true
pub fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// Splits a comma separated column list, trimming names and dropping empties
pub fn parse_columns(value: &str) -> Option<Vec<String>> {
    let columns: Vec<String> = value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if columns.is_empty() {
        None
    } else {
        Some(columns)
    }
}

/// Applies environment variable overrides
///
/// The variable names follow the ones used by existing `.env` files:
/// `NOTION_KEY`, `NOTION_DATABASE_ID`, `OUTPUT_DIR`, `NOTION_FRONTMATTER_COLS`,
/// `IS_FREEZE`, `COL_FREEZE`, `IS_LANG` and `COL_LANG`.
fn apply_env_overrides(config: &mut ExporterConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("N2MD_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("N2MD_DRY_RUN") {
        config.application.dry_run = parse_flag(&val);
    }

    // Notion overrides
    if let Ok(val) = std::env::var("NOTION_KEY") {
        config.notion.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("NOTION_DATABASE_ID") {
        config.notion.database_id = val;
    }
    if let Ok(val) = std::env::var("NOTION_API_BASE_URL") {
        config.notion.base_url = val;
    }
    if let Ok(val) = std::env::var("NOTION_VERSION") {
        config.notion.notion_version = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("OUTPUT_DIR") {
        if !val.is_empty() {
            config.export.output_dir = val;
        }
    }
    if let Ok(val) = std::env::var("NOTION_FRONTMATTER_COLS") {
        config.export.frontmatter_columns = parse_columns(&val);
    }
    if let Ok(val) = std::env::var("NOTION_TITLE_COL") {
        config.export.title_column = val;
    }
    if let Ok(val) = std::env::var("N2MD_FAIL_FAST") {
        config.export.fail_fast = parse_flag(&val);
    }
    if let Ok(val) = std::env::var("IS_FREEZE") {
        config.export.freeze.enabled = parse_flag(&val);
    }
    if let Ok(val) = std::env::var("COL_FREEZE") {
        config.export.freeze.column = Some(val);
    }
    if let Ok(val) = std::env::var("IS_LANG") {
        config.export.language.enabled = parse_flag(&val);
    }
    if let Ok(val) = std::env::var("COL_LANG") {
        config.export.language.column = Some(val);
    }

    Ok(())
}
