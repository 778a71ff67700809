//! Output routing
//!
//! Decides which directory a page is written to and makes sure it exists.

use crate::config::LanguageConfig;
use crate::domain::{N2mdError, Page, Result};
use std::path::{Component, Path, PathBuf};

/// Create the base output directory (and its parents)
pub async fn ensure_base_dir(base: &Path) -> Result<()> {
    tokio::fs::create_dir_all(base).await.map_err(|e| {
        N2mdError::Io(format!(
            "Failed to create output directory {}: {e}",
            base.display()
        ))
    })
}

/// Language of a page: the text of the language column, lowercased
///
/// An absent or unset value yields the empty string.
pub fn page_language(page: &Page, column: &str) -> String {
    page.property(column)
        .and_then(|value| value.text_value())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Join a page-supplied `name` below `dir`
///
/// Only plain components are kept: root, drive prefixes, `.` and `..` are
/// dropped, so the result always stays inside `dir`.
pub fn join_within(dir: &Path, name: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}

/// Directory a page belongs in, without touching the filesystem
pub fn target_dir(base: &Path, language: &LanguageConfig, page: &Page) -> PathBuf {
    match language.column.as_deref() {
        Some(column) if language.enabled => {
            let lang = page_language(page, column);
            join_within(base, &lang)
        }
        _ => base.to_path_buf(),
    }
}

/// Resolve the directory a page is written to
///
/// Without language partitioning this is `base`. With it, the page goes to
/// `<base>/<language>`, which is created on first use. An empty language
/// resolves to `base` itself.
///
/// # Errors
///
/// Returns an I/O error if the language directory cannot be created.
pub async fn resolve_output_dir(
    base: &Path,
    language: &LanguageConfig,
    page: &Page,
) -> Result<PathBuf> {
    let dir = target_dir(base, language, page);
    if dir == base {
        return Ok(dir);
    }

    match tokio::fs::create_dir_all(&dir).await {
        Ok(()) => {
            tracing::debug!(path = %dir.display(), "Language directory ready");
            Ok(dir)
        }
        Err(e) => Err(N2mdError::Io(format!(
            "Failed to create language directory {}: {e}",
            dir.display()
        ))),
    }
}
