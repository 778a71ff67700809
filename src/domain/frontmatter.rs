//! Frontmatter documents and exported files
//!
//! The frontmatter block is YAML-like, not YAML: values are written as-is
//! without quoting or escaping.

use std::fmt;
use std::path::PathBuf;

/// A rendered frontmatter value
#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    List(Vec<String>),
}

impl fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontmatterValue::Text(s) => f.write_str(s),
            FrontmatterValue::Number(n) => write!(f, "{n}"),
            FrontmatterValue::Bool(b) => write!(f, "{b}"),
            FrontmatterValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(s: &str) -> Self {
        FrontmatterValue::Text(s.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(s: String) -> Self {
        FrontmatterValue::Text(s)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(b: bool) -> Self {
        FrontmatterValue::Bool(b)
    }
}

impl From<i64> for FrontmatterValue {
    fn from(n: i64) -> Self {
        FrontmatterValue::Number(n.into())
    }
}

/// Ordered mapping of frontmatter keys to values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontmatterDocument {
    entries: Vec<(String, FrontmatterValue)>,
}

impl FrontmatterDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key; an existing key keeps its position and gets the new value
    pub fn insert(&mut self, key: impl Into<String>, value: FrontmatterValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the document as a `---` delimited block
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FrontmatterDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---")?;
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        writeln!(f, "---")
    }
}

impl<K: Into<String>> FromIterator<(K, FrontmatterValue)> for FrontmatterDocument {
    fn from_iter<I: IntoIterator<Item = (K, FrontmatterValue)>>(iter: I) -> Self {
        let mut doc = FrontmatterDocument::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

/// A Markdown file ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub content: String,
}

impl ExportedFile {
    /// Joins frontmatter and body into the final file content
    pub fn new(path: PathBuf, frontmatter: &FrontmatterDocument, body: &str) -> Self {
        let mut content = frontmatter.render();
        content.push_str(body);
        Self { path, content }
    }
}
