//! Block tree to Markdown conversion

use super::rich_text::{plain_text, rich_text_to_markdown};
use crate::domain::{Block, BlockContent, RichText};

/// A rendered block: its own Markdown plus its rendered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdBlock {
    /// Notion block type name
    pub kind: String,

    /// Markdown of the block itself
    pub parent: String,

    pub children: Vec<MdBlock>,
}

impl MdBlock {
    pub fn new(kind: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parent: parent.into(),
            children: Vec::new(),
        }
    }
}

/// Converts page bodies to Markdown
///
/// Implementations are pure: no I/O, no shared state.
pub trait MarkdownConverter: Send + Sync {
    /// Render each block (and its children) into an [`MdBlock`]
    fn blocks_to_markdown(&self, blocks: &[Block]) -> Vec<MdBlock>;

    /// Lay out rendered blocks as a single Markdown document
    fn to_markdown_string(&self, md_blocks: &[MdBlock]) -> String;

    /// Both steps at once
    fn convert(&self, blocks: &[Block]) -> String {
        self.to_markdown_string(&self.blocks_to_markdown(blocks))
    }
}

/// Markdown rendering of Notion blocks
///
/// # Example
///
/// ```rust
/// use n2md::adapters::markdown::{MarkdownConverter, NotionMarkdown};
/// use n2md::domain::{Block, BlockContent, RichText};
///
/// let blocks = vec![
///     Block::new("h", BlockContent::Heading { level: 2, text: vec![RichText::plain("Intro")] }),
///     Block::new("p", BlockContent::Paragraph(vec![RichText::plain("Hello.")])),
/// ];
/// assert_eq!(NotionMarkdown.convert(&blocks), "## Intro\n\nHello.\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NotionMarkdown;

impl MarkdownConverter for NotionMarkdown {
    fn blocks_to_markdown(&self, blocks: &[Block]) -> Vec<MdBlock> {
        let mut number = 0;
        blocks
            .iter()
            .map(|block| {
                if matches!(block.content, BlockContent::NumberedListItem(_)) {
                    number += 1;
                } else {
                    number = 0;
                }
                self.render_block(block, number)
            })
            .collect()
    }

    fn to_markdown_string(&self, md_blocks: &[MdBlock]) -> String {
        let mut out = String::new();
        let mut previous: Option<&str> = None;

        for block in md_blocks {
            let rendered = layout_block(self, block);
            if rendered.is_empty() {
                continue;
            }

            if !out.is_empty() {
                let same_list = is_list_kind(&block.kind) && previous == Some(block.kind.as_str());
                out.push_str(if same_list { "\n" } else { "\n\n" });
            }
            out.push_str(&rendered);
            previous = Some(block.kind.as_str());
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl NotionMarkdown {
    fn render_block(&self, block: &Block, number: usize) -> MdBlock {
        let kind = block.kind().to_string();

        // Table rows are folded into the table itself
        if let BlockContent::Table { has_column_header } = &block.content {
            return MdBlock::new(kind, render_table(&block.children, *has_column_header));
        }

        let parent = match &block.content {
            BlockContent::Paragraph(text) => rich_text_to_markdown(text),
            BlockContent::Heading { level, text } => format!(
                "{} {}",
                "#".repeat(usize::from((*level).clamp(1, 3))),
                rich_text_to_markdown(text)
            ),
            BlockContent::BulletedListItem(text) => format!("- {}", rich_text_to_markdown(text)),
            BlockContent::NumberedListItem(text) => {
                format!("{number}. {}", rich_text_to_markdown(text))
            }
            BlockContent::ToDo { text, checked } => format!(
                "- [{}] {}",
                if *checked { "x" } else { " " },
                rich_text_to_markdown(text)
            ),
            BlockContent::Toggle(text) => rich_text_to_markdown(text),
            BlockContent::Quote(text) => quote_lines(&rich_text_to_markdown(text)),
            BlockContent::Callout { text, icon } => {
                let body = rich_text_to_markdown(text);
                match icon {
                    Some(icon) => quote_lines(&format!("{icon} {body}")),
                    None => quote_lines(&body),
                }
            }
            BlockContent::Code { text, language } => {
                let language = match language.as_str() {
                    "plain text" => "",
                    other => other,
                };
                format!("```{language}\n{}\n```", plain_text(text))
            }
            BlockContent::Equation(expression) => format!("$$\n{expression}\n$$"),
            BlockContent::Divider => "---".to_string(),
            BlockContent::Image { url, caption } => {
                format!("![{}]({url})", plain_text(caption))
            }
            BlockContent::Link { url, caption } => {
                if url.is_empty() {
                    String::new()
                } else if caption.is_empty() {
                    format!("[{url}]({url})")
                } else {
                    format!("[{}]({url})", plain_text(caption))
                }
            }
            BlockContent::ChildPage(title) => format!(
                "[{title}](https://www.notion.so/{})",
                block.id.replace('-', "")
            ),
            BlockContent::TableRow(cells) => table_row(cells),
            BlockContent::Table { .. } => String::new(),
            BlockContent::Unsupported(kind) => {
                tracing::debug!(block_id = %block.id, kind = %kind, "Skipping unsupported block");
                String::new()
            }
        };

        MdBlock {
            kind,
            parent,
            children: self.blocks_to_markdown(&block.children),
        }
    }
}

fn layout_block(converter: &NotionMarkdown, block: &MdBlock) -> String {
    let children = converter.to_markdown_string(&block.children);
    let children = children.trim_end();

    if block.kind == "toggle" {
        return if children.is_empty() {
            format!("<details>\n<summary>{}</summary>\n</details>", block.parent)
        } else {
            format!(
                "<details>\n<summary>{}</summary>\n\n{children}\n\n</details>",
                block.parent
            )
        };
    }

    if children.is_empty() {
        return block.parent.clone();
    }
    if block.parent.is_empty() {
        return children.to_string();
    }

    match block.kind.as_str() {
        "bulleted_list_item" | "to_do" => format!("{}\n{}", block.parent, indent(children, 2)),
        "numbered_list_item" => format!("{}\n{}", block.parent, indent(children, 3)),
        "quote" | "callout" => format!("{}\n>\n{}", block.parent, quote_lines(children)),
        _ => format!("{}\n\n{children}", block.parent),
    }
}

fn is_list_kind(kind: &str) -> bool {
    matches!(kind, "bulleted_list_item" | "numbered_list_item" | "to_do")
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_row(cells: &[Vec<RichText>]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn render_table(rows: &[Block], has_column_header: bool) -> String {
    let rows: Vec<&Vec<Vec<RichText>>> = rows
        .iter()
        .filter_map(|row| match &row.content {
            BlockContent::TableRow(cells) => Some(cells),
            _ => None,
        })
        .collect();

    let Some(width) = rows.iter().map(|cells| cells.len()).max() else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let separator = format!("|{}", " --- |".repeat(width));
    let mut lines = Vec::with_capacity(rows.len() + 2);

    // Markdown tables always need a header row
    let body = if has_column_header {
        lines.push(table_row(rows[0]));
        &rows[1..]
    } else {
        lines.push(table_row(&vec![Vec::new(); width]));
        &rows[..]
    };
    lines.push(separator);
    lines.extend(body.iter().map(|cells| table_row(cells)));

    lines.join("\n")
}
