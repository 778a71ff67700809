//! Notion identifier types with validation
//!
//! Newtype wrappers keep database ids and page/block ids from being mixed up.
//! Notion accepts ids both with and without dashes, so both forms are kept
//! verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notion database identifier
///
/// # Examples
///
/// ```
/// use n2md::domain::ids::DatabaseId;
/// use std::str::FromStr;
///
/// let id = DatabaseId::from_str("668d797c-76fa-4934-9b05-ad288df2d136").unwrap();
/// assert_eq!(id.as_str(), "668d797c-76fa-4934-9b05-ad288df2d136");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Creates a new DatabaseId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("Database ID cannot be empty".to_string());
        }
        if id.contains('/') {
            return Err(format!("Database ID must not contain '/': {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the database ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatabaseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DatabaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Notion page (or block) identifier
///
/// A page id doubles as the root block id of the page body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(String);

impl PageId {
    /// Creates a new PageId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("Page ID cannot be empty".to_string());
        }
        if id.contains('/') {
            return Err(format!("Page ID must not contain '/': {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the page ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
