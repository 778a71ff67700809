//! Inline rendering of rich-text runs

use crate::domain::RichText;

/// Render rich-text runs as inline Markdown
///
/// Bold, italic, strikethrough, inline code and links are kept. Leading and
/// trailing whitespace of a run stays outside the markers so `**bold **`
/// never appears.
///
/// # Example
///
/// ```rust
/// use n2md::adapters::markdown::rich_text_to_markdown;
/// use n2md::domain::RichText;
///
/// let mut bold = RichText::plain("world");
/// bold.annotations.bold = true;
/// let runs = vec![RichText::plain("Hello "), bold];
/// assert_eq!(rich_text_to_markdown(&runs), "Hello **world**");
/// ```
pub fn rich_text_to_markdown(runs: &[RichText]) -> String {
    runs.iter().map(render_run).collect()
}

/// Plain text of all runs, without formatting
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}

fn render_run(run: &RichText) -> String {
    let text = run.plain_text.as_str();
    let trimmed_start = text.trim_start();
    if trimmed_start.is_empty() {
        return text.to_string();
    }

    let lead = &text[..text.len() - trimmed_start.len()];
    let core = trimmed_start.trim_end();
    let trail = &trimmed_start[core.len()..];

    let annotations = &run.annotations;
    let mut out = core.to_string();
    if annotations.code {
        out = format!("`{out}`");
    }
    if annotations.bold {
        out = format!("**{out}**");
    }
    if annotations.italic {
        out = format!("_{out}_");
    }
    if annotations.strikethrough {
        out = format!("~~{out}~~");
    }
    if let Some(href) = &run.href {
        out = format!("[{out}]({href})");
    }

    format!("{lead}{out}{trail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Annotations;

    fn run(text: &str, annotations: Annotations) -> RichText {
        RichText {
            plain_text: text.to_string(),
            href: None,
            annotations,
        }
    }

    #[test]
    fn test_plain_runs_are_concatenated() {
        let runs = vec![RichText::plain("Hello "), RichText::plain("World")];
        assert_eq!(rich_text_to_markdown(&runs), "Hello World");
        assert_eq!(plain_text(&runs), "Hello World");
    }

    #[test]
    fn test_annotations() {
        let runs = vec![
            run(
                "code",
                Annotations {
                    code: true,
                    ..Annotations::default()
                },
            ),
            RichText::plain(" and "),
            run(
                "both",
                Annotations {
                    bold: true,
                    italic: true,
                    ..Annotations::default()
                },
            ),
            RichText::plain(" "),
            run(
                "gone",
                Annotations {
                    strikethrough: true,
                    ..Annotations::default()
                },
            ),
        ];
        assert_eq!(
            rich_text_to_markdown(&runs),
            "`code` and _**both**_ ~~gone~~"
        );
    }

    #[test]
    fn test_whitespace_stays_outside_markers() {
        let runs = vec![run(
            " bold ",
            Annotations {
                bold: true,
                ..Annotations::default()
            },
        )];
        assert_eq!(rich_text_to_markdown(&runs), " **bold** ");
    }

    #[test]
    fn test_link() {
        let mut link = RichText::plain("docs");
        link.href = Some("https://example.com".to_string());
        assert_eq!(
            rich_text_to_markdown(&[link]),
            "[docs](https://example.com)"
        );
    }

    #[test]
    fn test_whitespace_only_run() {
        let runs = vec![run(
            "  ",
            Annotations {
                bold: true,
                ..Annotations::default()
            },
        )];
        assert_eq!(rich_text_to_markdown(&runs), "  ");
    }
}
