//! Line classification and block assembly.
//!
//! Every line is classified on its own, in this precedence: heading,
//! unordered item, ordered item, table row, paragraph. Adjacent lines of the
//! same list or table kind merge into one block. A blank line, or a line of
//! any other kind, ends the run, so `- a\n\n- b` is two lists.

use regex::Regex;
use std::sync::LazyLock;

use super::inline::parse_inlines;
use super::table;
use super::{Block, Inline};

/// Regex for `#`, `##` and `###` headings. Deeper levels are not headings.
static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.*)$").expect("valid regex"));

/// Regex for `-` / `*` list items, indentation ignored.
static UNORDERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*] (.*)$").expect("valid regex"));

/// Regex for `N.` list items, indentation ignored.
static ORDERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9]+\. (.*)$").expect("valid regex"));

/// What a single source line is.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    UnorderedItem(&'a str),
    OrderedItem(&'a str),
    /// Cells of a table row, or `None` for a separator row.
    TableRow(Option<Vec<String>>),
    Paragraph(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = HEADING_PATTERN.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.len()) as u8;
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        return Line::Heading { level, text };
    }
    if let Some(item) = capture_item(&UNORDERED_PATTERN, line) {
        return Line::UnorderedItem(item);
    }
    if let Some(item) = capture_item(&ORDERED_PATTERN, line) {
        return Line::OrderedItem(item);
    }
    if let Some(inner) = table::row_body(line) {
        let cells = table::split_cells(inner);
        if table::is_separator(&cells) {
            return Line::TableRow(None);
        }
        return Line::TableRow(Some(cells));
    }
    Line::Paragraph(line.trim())
}

fn capture_item<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// An open list or table run.
enum Run {
    Unordered(Vec<Vec<Inline>>),
    Ordered(Vec<Vec<Inline>>),
    Table(Vec<Vec<Vec<Inline>>>),
}

impl Run {
    fn into_block(self) -> Option<Block> {
        match self {
            Self::Unordered(items) => Some(Block::UnorderedList { items }),
            Self::Ordered(items) => Some(Block::OrderedList { items }),
            // A table made only of separator rows renders nothing.
            Self::Table(rows) if rows.is_empty() => None,
            Self::Table(rows) => Some(Block::Table { rows }),
        }
    }
}

/// Accumulates blocks while tracking the currently open run.
#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    run: Option<Run>,
}

impl Builder {
    fn flush(&mut self) {
        if let Some(block) = self.run.take().and_then(Run::into_block) {
            self.blocks.push(block);
        }
    }

    fn push_block(&mut self, block: Block) {
        self.flush();
        self.blocks.push(block);
    }

    fn push_unordered(&mut self, item: Vec<Inline>) {
        if let Some(Run::Unordered(items)) = &mut self.run {
            items.push(item);
        } else {
            self.flush();
            self.run = Some(Run::Unordered(vec![item]));
        }
    }

    fn push_ordered(&mut self, item: Vec<Inline>) {
        if let Some(Run::Ordered(items)) = &mut self.run {
            items.push(item);
        } else {
            self.flush();
            self.run = Some(Run::Ordered(vec![item]));
        }
    }

    fn push_row(&mut self, row: Option<Vec<Vec<Inline>>>) {
        if !matches!(self.run, Some(Run::Table(_))) {
            self.flush();
            self.run = Some(Run::Table(Vec::new()));
        }
        if let (Some(Run::Table(rows)), Some(row)) = (&mut self.run, row) {
            rows.push(row);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Split source text into blocks.
pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut builder = Builder::default();

    for line in source.lines() {
        match classify(line) {
            Line::Blank => builder.flush(),
            Line::Heading { level, text } => builder.push_block(Block::Heading {
                level,
                content: parse_inlines(text),
            }),
            Line::UnorderedItem(text) => builder.push_unordered(parse_inlines(text)),
            Line::OrderedItem(text) => builder.push_ordered(parse_inlines(text)),
            Line::TableRow(cells) => builder.push_row(
                cells.map(|cells| cells.iter().map(|cell| parse_inlines(cell)).collect()),
            ),
            Line::Paragraph(text) => builder.push_block(Block::Paragraph {
                content: parse_inlines(text),
            }),
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Inline {
        Inline::text(s)
    }

    fn items(texts: &[&str]) -> Vec<Vec<Inline>> {
        texts.iter().map(|s| vec![t(s)]).collect()
    }

    #[test]
    fn classify_headings() {
        assert_eq!(
            classify("# Title"),
            Line::Heading {
                level: 1,
                text: "Title"
            }
        );
        assert_eq!(
            classify("### Sub "),
            Line::Heading {
                level: 3,
                text: "Sub"
            }
        );
        assert_eq!(classify("#### Deep"), Line::Paragraph("#### Deep"));
        assert_eq!(classify("#NoSpace"), Line::Paragraph("#NoSpace"));
        assert_eq!(classify("  # Indented"), Line::Paragraph("# Indented"));
    }

    #[test]
    fn classify_list_items() {
        assert_eq!(classify("- a"), Line::UnorderedItem("a"));
        assert_eq!(classify("   * b"), Line::UnorderedItem("b"));
        assert_eq!(classify("12. c"), Line::OrderedItem("c"));
        assert_eq!(classify("-no space"), Line::Paragraph("-no space"));
        assert_eq!(classify("**bold** start"), Line::Paragraph("**bold** start"));
        assert_eq!(classify("3.14 is pi"), Line::Paragraph("3.14 is pi"));
    }

    #[test]
    fn classify_table_rows() {
        assert_eq!(
            classify("| a | b |"),
            Line::TableRow(Some(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(classify("|---|:---:|"), Line::TableRow(None));
        assert_eq!(classify("||"), Line::Paragraph("||"));
        assert_eq!(classify("| open"), Line::Paragraph("| open"));
    }

    #[test]
    fn blank_lines_are_blank() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify(" \t "), Line::Blank);
    }

    #[test]
    fn adjacent_items_merge() {
        assert_eq!(
            parse_blocks("- a\n- b"),
            vec![Block::UnorderedList {
                items: items(&["a", "b"])
            }]
        );
    }

    #[test]
    fn blank_line_splits_lists() {
        assert_eq!(
            parse_blocks("- a\n\n- b"),
            vec![
                Block::UnorderedList {
                    items: items(&["a"])
                },
                Block::UnorderedList {
                    items: items(&["b"])
                },
            ]
        );
    }

    #[test]
    fn paragraph_splits_lists() {
        assert_eq!(
            parse_blocks("1. a\nbetween\n2. b"),
            vec![
                Block::OrderedList {
                    items: items(&["a"])
                },
                Block::Paragraph {
                    content: vec![t("between")]
                },
                Block::OrderedList {
                    items: items(&["b"])
                },
            ]
        );
    }

    #[test]
    fn ordered_and_unordered_runs_are_independent() {
        assert_eq!(
            parse_blocks("- a\n1. b\n- c"),
            vec![
                Block::UnorderedList {
                    items: items(&["a"])
                },
                Block::OrderedList {
                    items: items(&["b"])
                },
                Block::UnorderedList {
                    items: items(&["c"])
                },
            ]
        );
    }

    #[test]
    fn table_rows_merge_and_drop_separator() {
        assert_eq!(
            parse_blocks("|a|b|\n|---|---|\n|1|2|"),
            vec![Block::Table {
                rows: vec![
                    vec![vec![t("a")], vec![t("b")]],
                    vec![vec![t("1")], vec![t("2")]],
                ],
            }]
        );
    }

    #[test]
    fn blank_line_splits_tables() {
        let blocks = parse_blocks("|a|\n\n|b|");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Table { .. })));
    }

    #[test]
    fn separator_only_table_renders_nothing() {
        assert!(parse_blocks("|---|---|").is_empty());
    }

    #[test]
    fn every_line_is_its_own_paragraph() {
        assert_eq!(
            parse_blocks("one\ntwo"),
            vec![
                Block::Paragraph {
                    content: vec![t("one")]
                },
                Block::Paragraph {
                    content: vec![t("two")]
                },
            ]
        );
    }

    #[test]
    fn heading_ends_a_list() {
        assert_eq!(
            parse_blocks("- a\n## Next"),
            vec![
                Block::UnorderedList {
                    items: items(&["a"])
                },
                Block::Heading {
                    level: 2,
                    content: vec![t("Next")]
                },
            ]
        );
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            parse_blocks("- a\r\n- b\r\n"),
            vec![Block::UnorderedList {
                items: items(&["a", "b"])
            }]
        );
    }

    #[test]
    fn inline_content_in_cells() {
        assert_eq!(
            parse_blocks("| **risk** | low |"),
            vec![Block::Table {
                rows: vec![vec![
                    vec![Inline::Strong {
                        children: vec![t("risk")]
                    }],
                    vec![t("low")],
                ]],
            }]
        );
    }
}
