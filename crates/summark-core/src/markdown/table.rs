//! Pipe table rows, both directions.
//!
//! Parsing side: splitting a `| a | b |` line into cells and recognizing
//! `|---|:---:|` separator rows. Building side: turning a flat JSON object
//! (the structured-extraction output) into a two-row Markdown table.

use serde_json::{Map, Value};

use crate::error::{TableError, TableResult};

/// Text produced for an empty object.
pub const EMPTY_TABLE: &str = "No data extracted.";

/// The text between the outer pipes of a table row, if `line` is one.
///
/// Trailing whitespace is ignored. A row needs at least one character between
/// its outer pipes.
pub fn row_body(line: &str) -> Option<&str> {
    let line = line.trim_end();
    if line.len() >= 3 && line.starts_with('|') && line.ends_with('|') {
        Some(&line[1..line.len() - 1])
    } else {
        None
    }
}

/// Split a row body on unescaped pipes. `\|` becomes a literal `|`.
pub fn split_cells(body: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

/// Whether every cell is a run of dashes with optional alignment colons.
pub fn is_separator(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| is_separator_cell(cell))
}

fn is_separator_cell(cell: &str) -> bool {
    let cell = cell.strip_prefix(':').unwrap_or(cell);
    let cell = cell.strip_suffix(':').unwrap_or(cell);
    !cell.is_empty() && cell.chars().all(|c| c == '-')
}

/// Build a Markdown table from a flat JSON object.
///
/// Keys form the header row and values the single data row, both in the
/// object's own order. An empty object yields [`EMPTY_TABLE`].
pub fn from_json_object(object: &Map<String, Value>) -> String {
    if object.is_empty() {
        return EMPTY_TABLE.to_string();
    }

    let header: Vec<String> = object.keys().map(|key| escape_cell(key)).collect();
    let values: Vec<String> = object
        .values()
        .map(|value| escape_cell(&cell_text(value)))
        .collect();

    format!(
        "| {} |\n| {} |\n| {} |",
        header.join(" | "),
        vec!["---"; header.len()].join(" | "),
        values.join(" | ")
    )
}

/// Parse `json` and build a table from it. The top level must be an object.
#[tracing::instrument(skip_all, fields(input_len = json.len()))]
pub fn from_json_str(json: &str) -> TableResult<String> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(object) => {
            tracing::debug!(columns = object.len(), "building table");
            Ok(from_json_object(&object))
        }
        other => Err(TableError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape pipes and fold line breaks so the cell stays on its row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{self, Block, Inline};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn split_cells_trims() {
        assert_eq!(split_cells(" a | b "), vec!["a", "b"]);
        assert_eq!(split_cells("a||b"), vec!["a", "", "b"]);
    }

    #[test]
    fn escaped_pipe_stays_in_cell() {
        assert_eq!(split_cells(r"a \| b | c"), vec!["a | b", "c"]);
    }

    #[test]
    fn lone_backslash_is_literal() {
        assert_eq!(split_cells(r"C:\path | x"), vec![r"C:\path", "x"]);
    }

    #[test]
    fn row_body_requires_outer_pipes() {
        assert_eq!(row_body("|a|b|  "), Some("a|b"));
        assert_eq!(row_body("|a"), None);
        assert_eq!(row_body("a|"), None);
        assert_eq!(row_body("||"), None);
        assert_eq!(row_body("|"), None);
    }

    #[test]
    fn separator_cells() {
        let cells = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(is_separator(&cells(&["---", ":--", "--:", ":-:"])));
        assert!(!is_separator(&cells(&["---", "x"])));
        assert!(!is_separator(&cells(&[":"])));
        assert!(!is_separator(&cells(&[""])));
        assert!(!is_separator(&[]));
    }

    #[test]
    fn empty_object_has_no_table() {
        assert_eq!(from_json_object(&Map::new()), "No data extracted.");
    }

    #[test]
    fn builds_header_separator_and_values() {
        let obj = object(json!({"name": "Acme", "revenue": 12.5, "public": true}));
        assert_eq!(
            from_json_object(&obj),
            "| name | revenue | public |\n| --- | --- | --- |\n| Acme | 12.5 | true |"
        );
    }

    #[test]
    fn null_is_empty_and_nested_is_compact_json() {
        let obj = object(json!({"ceo": null, "tags": ["a", "b"]}));
        assert_eq!(
            from_json_object(&obj),
            "| ceo | tags |\n| --- | --- |\n|  | [\"a\",\"b\"] |"
        );
    }

    #[test]
    fn pipes_in_values_are_escaped() {
        let obj = object(json!({"k": "a|b"}));
        let table = from_json_object(&obj);
        assert_eq!(table, "| k |\n| --- |\n| a\\|b |");

        let doc = markdown::parse(&table);
        assert_eq!(
            doc.blocks,
            vec![Block::Table {
                rows: vec![vec![vec![Inline::text("k")]], vec![vec![Inline::text("a|b")]]],
            }]
        );
    }

    #[test]
    fn multiline_values_stay_on_one_row() {
        let obj = object(json!({"notes": "first\nsecond"}));
        assert_eq!(
            from_json_object(&obj),
            "| notes |\n| --- |\n| first second |"
        );
    }

    #[test]
    fn table_renders_with_keys_first() {
        let obj = object(json!({"a": 1, "b": "two"}));
        assert_eq!(
            markdown::render(&from_json_object(&obj)),
            "<table><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>two</td></tr></table>"
        );
    }

    #[test]
    fn from_json_str_rejects_non_objects() {
        let err = from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, TableError::NotAnObject { found: "array" }));
        assert!(matches!(
            from_json_str("{oops").unwrap_err(),
            TableError::Json(_)
        ));
    }

    #[test]
    fn from_json_str_keeps_key_order() {
        let table = from_json_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        assert!(table.starts_with("| zeta | alpha |"));
    }
}
