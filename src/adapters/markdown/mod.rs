//! Markdown conversion of page bodies
//!
//! Conversion runs in two steps: [`MarkdownConverter::blocks_to_markdown`]
//! renders each block into an [`MdBlock`] (its own text plus rendered
//! children), then [`MarkdownConverter::to_markdown_string`] lays the tree out
//! as one document.

pub mod converter;
pub mod rich_text;

pub use converter::{MarkdownConverter, MdBlock, NotionMarkdown};
pub use rich_text::rich_text_to_markdown;
