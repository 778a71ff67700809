//! Page body blocks
//!
//! The body of a page is a tree of blocks. Children are fetched eagerly by the
//! Notion adapter so the Markdown converter can stay a pure function.

use super::page::RichText;

/// Typed content of a block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Paragraph(Vec<RichText>),
    /// Heading level 1..=3
    Heading { level: u8, text: Vec<RichText> },
    BulletedListItem(Vec<RichText>),
    NumberedListItem(Vec<RichText>),
    ToDo { text: Vec<RichText>, checked: bool },
    Toggle(Vec<RichText>),
    Quote(Vec<RichText>),
    Callout {
        text: Vec<RichText>,
        icon: Option<String>,
    },
    Code {
        text: Vec<RichText>,
        language: String,
    },
    Equation(String),
    Divider,
    Image {
        url: String,
        caption: Vec<RichText>,
    },
    /// Bookmark, embed, link preview, video, file and pdf blocks
    Link {
        url: String,
        caption: Vec<RichText>,
    },
    ChildPage(String),
    Table { has_column_header: bool },
    TableRow(Vec<Vec<RichText>>),
    /// Block types without a Markdown rendering
    Unsupported(String),
}

/// A block and its (already fetched) children
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub content: BlockContent,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(id: impl Into<String>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// Notion type name of the block
    pub fn kind(&self) -> &str {
        match &self.content {
            BlockContent::Paragraph(_) => "paragraph",
            BlockContent::Heading { level: 1, .. } => "heading_1",
            BlockContent::Heading { level: 2, .. } => "heading_2",
            BlockContent::Heading { .. } => "heading_3",
            BlockContent::BulletedListItem(_) => "bulleted_list_item",
            BlockContent::NumberedListItem(_) => "numbered_list_item",
            BlockContent::ToDo { .. } => "to_do",
            BlockContent::Toggle(_) => "toggle",
            BlockContent::Quote(_) => "quote",
            BlockContent::Callout { .. } => "callout",
            BlockContent::Code { .. } => "code",
            BlockContent::Equation(_) => "equation",
            BlockContent::Divider => "divider",
            BlockContent::Image { .. } => "image",
            BlockContent::Link { .. } => "bookmark",
            BlockContent::ChildPage(_) => "child_page",
            BlockContent::Table { .. } => "table",
            BlockContent::TableRow(_) => "table_row",
            BlockContent::Unsupported(kind) => kind,
        }
    }
}
