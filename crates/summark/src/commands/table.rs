//! Table command: JSON object to Markdown table.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use summark_core::markdown::{self, HtmlOptions, table};

use super::read_input_file;

/// Arguments for the `table` subcommand.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// JSON file holding one object (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Print the table rendered as HTML instead of Markdown.
    #[arg(long)]
    pub html: bool,
}

#[derive(Serialize)]
struct TableOutput {
    markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

/// Convert a JSON object to a Markdown table and print it.
#[instrument(name = "cmd_table", skip_all, fields(file = %args.file))]
pub fn cmd_table(
    args: TableArgs,
    global_json: bool,
    html_options: &HtmlOptions,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, html = args.html, "executing table command");

    let json = read_input_file(&args.file, max_input)?;
    let table = table::from_json_str(&json)
        .with_context(|| format!("failed to build table from {}", args.file))?;
    let html = args
        .html
        .then(|| markdown::render_with(&table, html_options));

    if global_json {
        let output = TableOutput {
            markdown: table,
            html,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", html.unwrap_or(table));
    }

    Ok(())
}
