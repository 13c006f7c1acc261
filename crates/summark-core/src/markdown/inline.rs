//! Inline span tokenizer.
//!
//! Code spans are cut out of the raw line first and never re-scanned. The
//! remaining styles run in a fixed order: highlight, strong, emphasis,
//! strikethrough. Each style pass works on the node sequence produced so far:
//! it first descends into spans built by earlier passes, then pairs
//! delimiters found in the text nodes of the current level. A pair may
//! enclose earlier spans (`**==x==**`) but can never open outside a span and
//! close inside it, so every construct is properly nested.
//!
//! Pairs are leftmost and non-greedy. A pair needs non-empty content that
//! does not start with the delimiter character itself, which keeps `****`
//! and `====` literal and lets `***x***` nest as emphasis around strong.

use super::Inline;

/// Span kinds that nest, in recognition order.
#[derive(Debug, Clone, Copy)]
enum Style {
    Highlight,
    Strong,
    Emphasis,
    Strikethrough,
}

const STYLES: &[Style] = &[
    Style::Highlight,
    Style::Strong,
    Style::Emphasis,
    Style::Strikethrough,
];

impl Style {
    /// Opening delimiters, tried in order at each position. A span closes
    /// with the same delimiter that opened it.
    const fn delimiters(self) -> &'static [&'static str] {
        match self {
            Self::Highlight => &["=="],
            Self::Strong => &["**", "__"],
            Self::Emphasis => &["*", "_"],
            Self::Strikethrough => &["~~"],
        }
    }

    fn wrap(self, children: Vec<Inline>) -> Inline {
        match self {
            Self::Highlight => Inline::Highlight { children },
            Self::Strong => Inline::Strong { children },
            Self::Emphasis => Inline::Emphasis { children },
            Self::Strikethrough => Inline::Strikethrough { children },
        }
    }
}

/// A byte position inside the text node at `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pos {
    node: usize,
    offset: usize,
}

/// A matched delimiter pair within a node sequence.
#[derive(Debug, PartialEq, Eq)]
struct Pair {
    delimiter: &'static str,
    open: Pos,
    close: Pos,
}

/// Tokenize one line of text into inline nodes.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut nodes = split_code(text);
    for &style in STYLES {
        nodes = apply_style(nodes, style);
    }
    nodes
}

/// Cut code spans out of raw text.
fn split_code(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some((start, end)) = find_code_span(rest) {
        push_text(&mut out, &rest[..start]);
        out.push(Inline::Code {
            text: rest[start + 1..end].to_string(),
        });
        rest = &rest[end + 1..];
    }
    push_text(&mut out, rest);
    out
}

/// Byte offsets of the opening and closing backtick of the first code span.
fn find_code_span(text: &str) -> Option<(usize, usize)> {
    text.match_indices('`').find_map(|(start, _)| {
        let first = text[start + 1..].chars().next().filter(|&c| c != '`')?;
        let from = start + 1 + first.len_utf8();
        text[from..].find('`').map(|offset| (start, from + offset))
    })
}

fn apply_style(nodes: Vec<Inline>, style: Style) -> Vec<Inline> {
    let nodes = nodes
        .into_iter()
        .map(|node| map_children(node, |children| apply_style(children, style)))
        .collect();
    pair_delimiters(nodes, style)
}

/// Rebuild a styled node with transformed children; other nodes pass through.
fn map_children(node: Inline, f: impl FnOnce(Vec<Inline>) -> Vec<Inline>) -> Inline {
    match node {
        Inline::Highlight { children } => Inline::Highlight {
            children: f(children),
        },
        Inline::Strong { children } => Inline::Strong {
            children: f(children),
        },
        Inline::Emphasis { children } => Inline::Emphasis {
            children: f(children),
        },
        Inline::Strikethrough { children } => Inline::Strikethrough {
            children: f(children),
        },
        other @ (Inline::Text { .. } | Inline::Code { .. }) => other,
    }
}

/// Replace every delimiter pair at this level with a span node.
///
/// The cursor only moves forward. Text before each opener and inside each
/// pair is copied out and spans are moved, so each node is visited once.
fn pair_delimiters(mut nodes: Vec<Inline>, style: Style) -> Vec<Inline> {
    let delimiters = style.delimiters();
    let mut exhausted = vec![false; delimiters.len()];
    let mut out = Vec::with_capacity(nodes.len());
    let mut cursor = Pos { node: 0, offset: 0 };

    while let Some(pair) = find_pair(&nodes, cursor, delimiters, &mut exhausted) {
        let width = pair.delimiter.len();
        move_range(&mut nodes, cursor, pair.open, &mut out);

        let mut children = Vec::new();
        let content = Pos {
            node: pair.open.node,
            offset: pair.open.offset + width,
        };
        move_range(&mut nodes, content, pair.close, &mut children);
        out.push(style.wrap(children));

        cursor = Pos {
            node: pair.close.node,
            offset: pair.close.offset + width,
        };
    }

    let end = Pos {
        node: nodes.len(),
        offset: 0,
    };
    move_range(&mut nodes, cursor, end, &mut out);
    out
}

/// Append the nodes between `from` and `to` to `out`.
///
/// Text nodes are sliced at the two positions; spans strictly inside the
/// range are moved out of `nodes`.
fn move_range(nodes: &mut [Inline], from: Pos, to: Pos, out: &mut Vec<Inline>) {
    let stop = to.node.saturating_add(1);
    for (index, node) in nodes.iter_mut().enumerate().take(stop).skip(from.node) {
        match node {
            Inline::Text { text } => {
                let start = if index == from.node { from.offset } else { 0 };
                let end = if index == to.node { to.offset } else { text.len() };
                if start < end {
                    push_text(out, &text[start..end]);
                }
            }
            // The cursor is already past the placeholder left behind.
            span if index < to.node => {
                out.push(std::mem::replace(span, Inline::text("")));
            }
            _ => {}
        }
    }
}

/// Find the leftmost delimiter pair at or after `from`.
///
/// At each position the delimiters are tried in order; the first one that
/// opens a complete pair wins. The closer is the nearest occurrence after the
/// first unit of content, where a unit is a character or a whole span. A
/// delimiter with no closer left is marked in `exhausted` and not tried again.
fn find_pair(
    nodes: &[Inline],
    from: Pos,
    delimiters: &[&'static str],
    exhausted: &mut [bool],
) -> Option<Pair> {
    for (index, node) in nodes.iter().enumerate().skip(from.node) {
        let Inline::Text { text } = node else {
            continue;
        };
        let base = if index == from.node { from.offset } else { 0 };
        for (relative, _) in text[base..].char_indices() {
            let offset = base + relative;
            for (slot, &delimiter) in delimiters.iter().enumerate() {
                if exhausted[slot] || !text[offset..].starts_with(delimiter) {
                    continue;
                }
                let content = offset + delimiter.len();
                let search_from = match text[content..].chars().next() {
                    Some(first) if delimiter.starts_with(first) => continue,
                    Some(first) => Pos {
                        node: index,
                        offset: content + first.len_utf8(),
                    },
                    // Content starts with the next node, which is a span.
                    None if index + 1 < nodes.len() => Pos {
                        node: index + 1,
                        offset: 0,
                    },
                    None => continue,
                };
                match find_closer(nodes, search_from, delimiter) {
                    Some(close) => {
                        return Some(Pair {
                            delimiter,
                            open: Pos {
                                node: index,
                                offset,
                            },
                            close,
                        });
                    }
                    None => exhausted[slot] = true,
                }
            }
            if exhausted.iter().all(|&done| done) {
                return None;
            }
        }
    }
    None
}

fn find_closer(nodes: &[Inline], from: Pos, delimiter: &str) -> Option<Pos> {
    nodes
        .iter()
        .enumerate()
        .skip(from.node)
        .find_map(|(index, node)| {
            let Inline::Text { text } = node else {
                return None;
            };
            let start = if index == from.node { from.offset } else { 0 };
            text[start..].find(delimiter).map(|found| Pos {
                node: index,
                offset: start + found,
            })
        })
}

/// Append text, merging with a preceding text node. Empty text is dropped.
fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text { text: last }) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::text(text));
    }
}
