//! Database pages and their typed property values
//!
//! A [`Page`] is one record of a Notion database. Its properties keep the
//! order in which the API returned them, which is also the order they end up
//! in the frontmatter when no explicit column list is configured.

use super::ids::PageId;
use serde::{Deserialize, Serialize};

/// Formatting flags attached to a rich-text run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// One run of rich text as returned by the Notion API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    /// Text without any formatting
    #[serde(default)]
    pub plain_text: String,

    /// Link target, if the run is a link or mention
    #[serde(default)]
    pub href: Option<String>,

    /// Formatting flags
    #[serde(default)]
    pub annotations: Annotations,
}

impl RichText {
    /// Creates an unformatted run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
            annotations: Annotations::default(),
        }
    }
}

/// A select or multi-select option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display name
    pub name: String,

    #[serde(default)]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }
}

/// Value of a date property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// ISO 8601 date or datetime
    pub start: String,

    #[serde(default)]
    pub end: Option<String>,

    #[serde(default)]
    pub time_zone: Option<String>,
}

/// A typed property value
///
/// Kinds the exporter has no rendering rule for are kept as [`PropertyValue::Other`]
/// so they can be reported but never reach the frontmatter.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<serde_json::Number>),
    Checkbox(bool),
    Url(Option<String>),
    Date(Option<DateRange>),
    MultiSelect(Vec<SelectOption>),
    Select(Option<SelectOption>),
    /// Any other property kind (formula, relation, people, ...)
    Other { kind: String },
}

impl PropertyValue {
    /// The Notion property type name
    pub fn kind(&self) -> &str {
        match self {
            PropertyValue::Title(_) => "title",
            PropertyValue::RichText(_) => "rich_text",
            PropertyValue::Number(_) => "number",
            PropertyValue::Checkbox(_) => "checkbox",
            PropertyValue::Url(_) => "url",
            PropertyValue::Date(_) => "date",
            PropertyValue::MultiSelect(_) => "multi_select",
            PropertyValue::Select(_) => "select",
            PropertyValue::Other { kind } => kind,
        }
    }

    /// Short textual value used for routing decisions
    ///
    /// Title and rich text yield their first run, select its option name and
    /// url its target. Everything else has no text value.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => {
                runs.first().map(|run| run.plain_text.as_str())
            }
            PropertyValue::Select(option) => option.as_ref().map(|o| o.name.as_str()),
            PropertyValue::Url(url) => url.as_deref(),
            _ => None,
        }
    }
}

/// A named property of a page
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

/// A page (record) of a Notion database
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page identifier, also the root block of the page body
    pub id: PageId,

    /// Properties in API order
    pub properties: Vec<Property>,

    /// Public Notion URL of the page
    pub url: Option<String>,
}

impl Page {
    /// Creates a page without properties
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            properties: Vec::new(),
            url: None,
        }
    }

    /// Appends a property, keeping insertion order
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push(Property {
            name: name.into(),
            value,
        });
        self
    }

    /// Looks up a property by exact name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Property names in API order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Plain text of the first run of the given title column
    pub fn title(&self, column: &str) -> Option<&str> {
        match self.property(column)? {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => {
                runs.first().map(|run| run.plain_text.as_str())
            }
            _ => None,
        }
    }
}
