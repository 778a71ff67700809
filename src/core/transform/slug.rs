//! Slug resolution

use crate::domain::FrontmatterDocument;
use regex::Regex;
use std::sync::OnceLock;

fn disallowed_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("slug pattern is valid"))
}

/// Resolve the file name (without extension) of a page
///
/// The first frontmatter key containing `slug` (any case) wins and its value
/// is used verbatim. Otherwise the slug is derived from the title with
/// [`slugify`]. Neither path guarantees a unique or non-empty result.
///
/// # Examples
///
/// ```
/// use n2md::core::transform::resolve_slug;
/// use n2md::domain::FrontmatterDocument;
///
/// let mut doc = FrontmatterDocument::new();
/// assert_eq!(resolve_slug(&doc, "Hello World"), "helloworld");
///
/// doc.insert("Slug", "my-post".into());
/// assert_eq!(resolve_slug(&doc, "Hello World"), "my-post");
/// ```
pub fn resolve_slug(frontmatter: &FrontmatterDocument, title: &str) -> String {
    frontmatter
        .iter()
        .find(|(key, _)| key.to_lowercase().contains("slug"))
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| slugify(title))
}

/// Derive a slug from a title
///
/// Lowercases, turns each `" _"` into `-`, then drops every character
/// outside `[A-Za-z0-9_-]`. Spaces are dropped, not replaced.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace(" _", "-");
    disallowed_chars().replace_all(&lowered, "").into_owned()
}
