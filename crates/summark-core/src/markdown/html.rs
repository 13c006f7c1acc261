//! HTML serialization of a parsed [`Document`].
//!
//! All source text passes through [`escape_text`]; the only markup in the
//! output is the fixed tag set below.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Block, Document, Inline};

/// Presentation options for HTML output.
///
/// Classes let a host page style highlights and code spans without inline
/// styles. `None` emits bare tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HtmlOptions {
    /// Class attribute for `<mark>` elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_class: Option<String>,
    /// Class attribute for `<code>` elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_class: Option<String>,
}

/// Serialize `document`, one block per line.
pub fn write_document(document: &Document, options: &HtmlOptions) -> String {
    let mut out = String::new();
    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_block(block, options, &mut out);
    }
    out
}

fn write_block(block: &Block, options: &HtmlOptions, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 3);
            out.push_str(&format!("<h{level}>"));
            write_inlines(content, options, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::UnorderedList { items } => write_list("ul", items, options, out),
        Block::OrderedList { items } => write_list("ol", items, options, out),
        Block::Table { rows } => {
            out.push_str("<table>");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str("<td>");
                    write_inlines(cell, options, out);
                    out.push_str("</td>");
                }
                out.push_str("</tr>");
            }
            out.push_str("</table>");
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            write_inlines(content, options, out);
            out.push_str("</p>");
        }
    }
}

fn write_list(tag: &str, items: &[Vec<Inline>], options: &HtmlOptions, out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    for item in items {
        out.push_str("<li>");
        write_inlines(item, options, out);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
}

fn write_inlines(nodes: &[Inline], options: &HtmlOptions, out: &mut String) {
    for node in nodes {
        write_inline(node, options, out);
    }
}

fn write_inline(node: &Inline, options: &HtmlOptions, out: &mut String) {
    match node {
        Inline::Text { text } => out.push_str(&escape_text(text)),
        Inline::Code { text } => {
            open_tag("code", options.code_class.as_deref(), out);
            out.push_str(&escape_text(text));
            out.push_str("</code>");
        }
        Inline::Strong { children } => wrap("strong", children, options, out),
        Inline::Emphasis { children } => wrap("em", children, options, out),
        Inline::Strikethrough { children } => wrap("del", children, options, out),
        Inline::Highlight { children } => {
            open_tag("mark", options.highlight_class.as_deref(), out);
            write_inlines(children, options, out);
            out.push_str("</mark>");
        }
    }
}

fn wrap(tag: &str, children: &[Inline], options: &HtmlOptions, out: &mut String) {
    open_tag(tag, None, out);
    write_inlines(children, options, out);
    out.push_str(&format!("</{tag}>"));
}

fn open_tag(tag: &str, class: Option<&str>, out: &mut String) {
    match class.filter(|c| !c.trim().is_empty()) {
        Some(class) => out.push_str(&format!("<{tag} class=\"{}\">", escape_attr(class))),
        None => out.push_str(&format!("<{tag}>")),
    }
}

/// Escape text content: `&`, `<` and `>`.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{parse, render, render_with};

    #[test]
    fn escape_text_handles_markup_chars() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_text("\"quoted\" 'single'"), "\"quoted\" 'single'");
    }

    #[test]
    fn escape_attr_handles_quotes() {
        assert_eq!(escape_attr("x\" onclick=\"y"), "x&quot; onclick=&quot;y");
    }

    #[test]
    fn blocks_join_with_newlines() {
        assert_eq!(
            render("# A\n- b\n1. c\ntext"),
            "<h1>A</h1>\n<ul><li>b</li></ul>\n<ol><li>c</li></ol>\n<p>text</p>"
        );
    }

    #[test]
    fn inline_tags() {
        assert_eq!(
            render("**s** *e* ~~d~~ ==m== `c`"),
            "<p><strong>s</strong> <em>e</em> <del>d</del> <mark>m</mark> <code>c</code></p>"
        );
    }

    #[test]
    fn code_content_is_escaped_not_parsed() {
        assert_eq!(
            render("`<b>**x**</b>`"),
            "<p><code>&lt;b&gt;**x**&lt;/b&gt;</code></p>"
        );
    }

    #[test]
    fn classes_are_applied() {
        let options = HtmlOptions {
            highlight_class: Some("hl".to_string()),
            code_class: Some("mono".to_string()),
        };
        assert_eq!(
            render_with("==x== `y`", &options),
            "<p><mark class=\"hl\">x</mark> <code class=\"mono\">y</code></p>"
        );
    }

    #[test]
    fn class_values_are_attribute_escaped() {
        let options = HtmlOptions {
            highlight_class: Some("a\"><script>".to_string()),
            code_class: None,
        };
        assert_eq!(
            render_with("==x==", &options),
            "<p><mark class=\"a&quot;&gt;&lt;script&gt;\">x</mark></p>"
        );
    }

    #[test]
    fn blank_class_is_ignored() {
        let options = HtmlOptions {
            highlight_class: Some("  ".to_string()),
            code_class: None,
        };
        assert_eq!(render_with("==x==", &options), "<p><mark>x</mark></p>");
    }

    #[test]
    fn deserialized_heading_level_is_clamped() {
        let doc: Document = serde_json::from_str(
            r#"{"blocks":[{"type":"heading","level":9,"content":[{"type":"text","text":"x"}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.to_html(&HtmlOptions::default()), "<h3>x</h3>");
    }

    /// Tags the serializer emits with default options.
    const GENERATED_TAGS: &[&str] = &[
        "<h1>", "</h1>", "<h2>", "</h2>", "<h3>", "</h3>", "<p>", "</p>", "<ul>", "</ul>",
        "<ol>", "</ol>", "<li>", "</li>", "<table>", "</table>", "<tr>", "</tr>", "<td>",
        "</td>", "<strong>", "</strong>", "<em>", "</em>", "<del>", "</del>", "<mark>",
        "</mark>", "<code>", "</code>",
    ];

    const ENTITIES: &[&str] = &["&lt;", "&gt;", "&amp;", "&quot;"];

    /// Panic if `html` holds a `<`, `>` or `&` that is not part of a
    /// generated tag or an entity.
    fn assert_only_generated_markup(source: &str, html: &str) {
        let mut rest = html;
        while let Some(pos) = rest.find(['<', '>', '&']) {
            let tail = &rest[pos..];
            let Some(token) = GENERATED_TAGS
                .iter()
                .chain(ENTITIES)
                .find(|token| tail.starts_with(**token))
            else {
                panic!("raw markup at {tail:?} in {html:?} (source {source:?})");
            };
            rest = &tail[token.len()..];
        }
    }

    #[test]
    fn source_markup_never_reaches_output_unescaped() {
        let sources = [
            "<script>alert(1)</script>",
            "<<>>&&",
            "&lt; &amp; &#60; &quot;",
            "**<b>** & *<i>* _</i>_",
            "==<mark>== ==>",
            "~~<del>~~ > ~~",
            "***<x>***",
            "**a ==<b** c==>",
            "*_<_*_>",
            "`<code>` & `&amp;`",
            "==`<`== **`>`**",
            "`unclosed <b> & more",
            "# <h1> & co\n## </h2>\n### a<b>c\n#### <h4>",
            "- <li>\n* </ul>\n1. </ol>\n  2. a & b",
            "| <td> | a & b |\n|---|---|\n| x>y | `<` |",
            "| \\| <a> \\| | **<** |",
            "|<|\n|>|\n|&|",
            "| ==<== | ~~&~~ |\n| :-: | --: |",
            "plain < text > with & ampersands\n\n<p>second</p>",
        ];
        for source in sources {
            assert_only_generated_markup(source, &render(source));
        }
    }

    #[test]
    fn to_html_matches_render() {
        let src = "## Plan\n|a|b|\n- ==x==";
        assert_eq!(parse(src).to_html(&HtmlOptions::default()), render(src));
    }
}
