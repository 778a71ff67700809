//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use n2md::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "N2MD_LOG_LEVEL",
    "N2MD_DRY_RUN",
    "N2MD_FAIL_FAST",
    "NOTION_KEY",
    "NOTION_DATABASE_ID",
    "NOTION_API_BASE_URL",
    "NOTION_VERSION",
    "NOTION_TITLE_COL",
    "OUTPUT_DIR",
    "NOTION_FRONTMATTER_COLS",
    "IS_FREEZE",
    "COL_FREEZE",
    "IS_LANG",
    "COL_LANG",
    "TEST_N2MD_NOTION_KEY",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const MINIMAL: &str = r#"
[notion]
api_key = "secret_from_file"
database_id = "668d797c76fa49349b05ad288df2d136"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_N2MD_NOTION_KEY", "secret_substituted");

    let file = write_config(
        r#"
[application]
log_level = "debug"

[notion]
# api_key = "${NOT_SET_BUT_COMMENTED}"
api_key = "${TEST_N2MD_NOTION_KEY}"
database_id = "668d797c76fa49349b05ad288df2d136"
page_size = 50

[notion.retry]
max_retries = 5
initial_delay_ms = 250

[export]
output_dir = "content/blog"
frontmatter_columns = ["title", "Slug", "Tags"]
title_column = "Name"
fail_fast = true

[export.freeze]
enabled = true
column = "Frozen"

[export.language]
enabled = true
column = "Language"

[logging]
local_enabled = false
local_rotation = "hourly"
"#,
    );

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.notion.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "secret_substituted"
    );
    assert_eq!(config.notion.page_size, 50);
    assert_eq!(config.notion.retry.max_retries, 5);
    assert_eq!(config.notion.retry.initial_delay_ms, 250);
    assert_eq!(config.notion.base_url, "https://api.notion.com");
    assert_eq!(config.export.output_dir, "content/blog");
    assert_eq!(
        config.export.frontmatter_columns,
        Some(vec!["title".to_string(), "Slug".to_string(), "Tags".to_string()])
    );
    assert_eq!(config.export.title_column, "Name");
    assert!(config.export.fail_fast);
    assert!(config.export.freeze.enabled);
    assert_eq!(config.export.freeze.column.as_deref(), Some("Frozen"));
    assert!(config.export.language.enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    cleanup_env_vars();
}

#[test]
fn test_env_overrides_beat_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    let file = write_config(MINIMAL);

    std::env::set_var("NOTION_KEY", "secret_from_env");
    std::env::set_var("NOTION_DATABASE_ID", "env-database");
    std::env::set_var("OUTPUT_DIR", "env-output");
    std::env::set_var("NOTION_FRONTMATTER_COLS", "title, Date ,Tags");
    std::env::set_var("IS_FREEZE", "true");
    std::env::set_var("COL_FREEZE", "Frozen");
    std::env::set_var("IS_LANG", "1");
    std::env::set_var("COL_LANG", "Lang");

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(
        config.notion.api_key.as_ref().unwrap().expose_secret().as_ref(),
        "secret_from_env"
    );
    assert_eq!(config.notion.database_id, "env-database");
    assert_eq!(config.export.output_dir, "env-output");
    assert_eq!(
        config.export.frontmatter_columns,
        Some(vec!["title".to_string(), "Date".to_string(), "Tags".to_string()])
    );
    assert!(config.export.freeze.enabled);
    assert_eq!(config.export.freeze.column.as_deref(), Some("Frozen"));
    assert!(config.export.language.enabled);
    assert_eq!(config.export.language.column.as_deref(), Some("Lang"));

    cleanup_env_vars();
}

#[test]
fn test_flag_values() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    let file = write_config(MINIMAL);

    for falsy in ["", "0", "false", "FALSE", "no", "off"] {
        std::env::set_var("IS_FREEZE", falsy);
        let config = load_config(Some(file.path())).unwrap();
        assert!(!config.export.freeze.enabled, "{falsy:?} should be false");
    }

    std::env::set_var("N2MD_DRY_RUN", "yes");
    let config = load_config(Some(file.path())).unwrap();
    assert!(config.is_dry_run());

    cleanup_env_vars();
}

#[test]
fn test_empty_output_dir_env_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    let file = write_config(MINIMAL);

    std::env::set_var("OUTPUT_DIR", "");
    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.export.output_dir, "./output");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    let file = write_config(
        r#"
[notion]
api_key = "${TEST_N2MD_NOTION_KEY}"
database_id = "db"
"#,
    );

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("TEST_N2MD_NOTION_KEY"));
}

#[test]
fn test_missing_api_key_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    let file = write_config(
        r#"
[notion]
database_id = "db"
"#,
    );

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("validation failed"));
}

#[test]
fn test_freeze_without_column_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    let file = write_config(MINIMAL);

    std::env::set_var("IS_FREEZE", "true");
    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("COL_FREEZE"));

    cleanup_env_vars();
}

#[test]
fn test_explicit_missing_file() {
    let result = load_config(Some(Path::new("/nonexistent/n2md.toml")));
    assert!(result.is_err());
}
