//! Lightweight Markdown rendering.
//!
//! Handles the restricted dialect LLM summaries are written in: `#`/`##`/`###`
//! headings, `-`/`*` and `N.` list items, pipe tables, `**strong**`,
//! `*emphasis*`, `~~strikethrough~~`, `` `code` `` and `==highlight==`.
//!
//! Parsing is two-level. [`block`] classifies each line and merges adjacent
//! list items and table rows; [`inline`] tokenizes the text inside each block.
//! The resulting [`Document`] is serialized by [`html`], which escapes every
//! piece of source text, so the output is safe to embed without further
//! escaping.
//!
//! Rendering never fails. Unmatched delimiters and malformed rows fall back to
//! literal text.

pub mod block;
pub mod html;
pub mod inline;
pub mod table;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use html::HtmlOptions;

/// A parsed Markdown document: a flat sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Blocks in source order.
    pub blocks: Vec<Block>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A `#`, `##` or `###` heading.
    Heading {
        /// Heading level, 1 through 3.
        level: u8,
        /// Heading content.
        content: Vec<Inline>,
    },
    /// A run of adjacent `-`/`*` items.
    UnorderedList {
        /// One inline sequence per item.
        items: Vec<Vec<Inline>>,
    },
    /// A run of adjacent `N.` items.
    OrderedList {
        /// One inline sequence per item.
        items: Vec<Vec<Inline>>,
    },
    /// A run of adjacent pipe-delimited rows, separator rows removed.
    Table {
        /// Rows of cells; each cell is an inline sequence.
        rows: Vec<Vec<Vec<Inline>>>,
    },
    /// Any other non-blank line.
    Paragraph {
        /// Paragraph content.
        content: Vec<Inline>,
    },
}

/// An inline node.
///
/// Text is stored unescaped; escaping happens at serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Literal text.
    Text {
        /// The text.
        text: String,
    },
    /// `**strong**` or `__strong__`.
    Strong {
        /// Nested content.
        children: Vec<Self>,
    },
    /// `*emphasis*` or `_emphasis_`.
    Emphasis {
        /// Nested content.
        children: Vec<Self>,
    },
    /// `~~strikethrough~~`.
    Strikethrough {
        /// Nested content.
        children: Vec<Self>,
    },
    /// `==highlight==`.
    Highlight {
        /// Nested content.
        children: Vec<Self>,
    },
    /// `` `code` ``; content is never interpreted.
    Code {
        /// The code text.
        text: String,
    },
}

impl Inline {
    /// Shorthand for a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Append the visible text of this node (markers removed) to `out`.
    fn push_plain(&self, out: &mut String) {
        match self {
            Self::Text { text } | Self::Code { text } => out.push_str(text),
            Self::Strong { children }
            | Self::Emphasis { children }
            | Self::Strikethrough { children }
            | Self::Highlight { children } => push_plain_all(children, out),
        }
    }
}

fn push_plain_all(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        node.push_plain(out);
    }
}

impl Document {
    /// Serialize the document to HTML with the given options.
    pub fn to_html(&self, options: &HtmlOptions) -> String {
        html::write_document(self, options)
    }

    /// Project the document to plain text, one line per block.
    ///
    /// List items and table rows each get their own line; table cells are
    /// separated by a single space. Useful for feeding rendered prose to the
    /// keyword extractor without Markdown markers.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Heading { content, .. } | Block::Paragraph { content } => {
                    push_plain_all(content, &mut out);
                    out.push('\n');
                }
                Block::UnorderedList { items } | Block::OrderedList { items } => {
                    for item in items {
                        push_plain_all(item, &mut out);
                        out.push('\n');
                    }
                }
                Block::Table { rows } => {
                    for row in rows {
                        for (i, cell) in row.iter().enumerate() {
                            if i > 0 {
                                out.push(' ');
                            }
                            push_plain_all(cell, &mut out);
                        }
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

/// Parse Markdown source into a [`Document`].
#[tracing::instrument(skip_all, fields(input_len = source.len()))]
pub fn parse(source: &str) -> Document {
    let document = Document {
        blocks: block::parse_blocks(source),
    };
    tracing::debug!(blocks = document.blocks.len(), "parsed markdown");
    document
}

/// Render Markdown source to HTML with default options.
pub fn render(source: &str) -> String {
    render_with(source, &HtmlOptions::default())
}

/// Render Markdown source to HTML with the given options.
pub fn render_with(source: &str, options: &HtmlOptions) -> String {
    parse(source).to_html(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_deterministic() {
        let input = "# Title\n\n- **a**\n- b\n\n|x|y|\n|---|---|\n|1|2|\n\n==note==";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn empty_and_blank_inputs_render_nothing() {
        assert_eq!(render(""), "");
        assert_eq!(render("   \n\t\n"), "");
        assert!(parse("\n\n").blocks.is_empty());
    }

    #[test]
    fn punctuation_only_input_is_a_paragraph() {
        assert_eq!(render("12345 !!! ??"), "<p>12345 !!! ??</p>");
    }

    #[test]
    fn strong_wraps_bold() {
        assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn double_delimiters_do_not_add_emphasis() {
        let html = render("**x**");
        assert!(!html.contains("<em>"));
        assert_eq!(html, "<p><strong>x</strong></p>");
    }

    #[test]
    fn headings_by_level() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("### Sub"), "<h3>Sub</h3>");
    }

    #[test]
    fn source_markup_is_escaped() {
        let html = render("<script>alert('x')</script> & **<b>**");
        assert_eq!(
            html,
            "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; <strong>&lt;b&gt;</strong></p>"
        );
    }

    #[test]
    fn table_with_separator_has_two_rows() {
        let doc = parse("|a|b|\n|---|---|\n|1|2|");
        assert_eq!(
            doc.blocks,
            vec![Block::Table {
                rows: vec![
                    vec![vec![Inline::text("a")], vec![Inline::text("b")]],
                    vec![vec![Inline::text("1")], vec![Inline::text("2")]],
                ],
            }]
        );
        assert_eq!(
            render("|a|b|\n|---|---|\n|1|2|"),
            "<table><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>2</td></tr></table>"
        );
    }

    #[test]
    fn plain_text_drops_markers() {
        let doc = parse("## Risk *summary*\n- ==high== impact\n|a|`b`|");
        assert_eq!(doc.plain_text(), "Risk summary\nhigh impact\na b\n");
    }

    #[test]
    fn document_serializes_with_type_tags() {
        let doc = parse("# Hi");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["blocks"][0]["type"], "heading");
        assert_eq!(json["blocks"][0]["level"], 1);
        assert_eq!(json["blocks"][0]["content"][0]["type"], "text");
        assert_eq!(json["blocks"][0]["content"][0]["text"], "Hi");
    }
}
