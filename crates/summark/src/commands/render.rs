//! Render command: Markdown to HTML.

use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use summark_core::markdown::{self, Document, HtmlOptions};

use super::read_input_file;

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown file to render (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Class attribute for `<mark>` elements (overrides config).
    #[arg(long, value_name = "CLASS")]
    pub highlight_class: Option<String>,

    /// Class attribute for `<code>` elements (overrides config).
    #[arg(long, value_name = "CLASS")]
    pub code_class: Option<String>,
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    html: String,
    document: &'a Document,
}

/// Render a Markdown file and print the HTML, or the HTML plus node tree
/// with `--json`.
#[instrument(name = "cmd_render", skip_all, fields(file = %args.file))]
pub fn cmd_render(
    args: RenderArgs,
    global_json: bool,
    config_options: HtmlOptions,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing render command");

    let source = read_input_file(&args.file, max_input)?;
    let options = HtmlOptions {
        highlight_class: args.highlight_class.or(config_options.highlight_class),
        code_class: args.code_class.or(config_options.code_class),
    };

    let document = markdown::parse(&source);
    let html = document.to_html(&options);

    if global_json {
        let output = RenderOutput {
            html,
            document: &document,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !html.is_empty() {
        println!("{html}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_for(tmp: &TempDir, contents: &str) -> RenderArgs {
        let path = Utf8PathBuf::try_from(tmp.path().join("doc.md")).unwrap();
        std::fs::write(&path, contents).unwrap();
        RenderArgs {
            file: path,
            highlight_class: None,
            code_class: None,
        }
    }

    #[test]
    fn renders_text_and_json() {
        let tmp = TempDir::new().unwrap();
        let args = args_for(&tmp, "# Title\n- ==a==");
        assert!(cmd_render(args, false, HtmlOptions::default(), None).is_ok());

        let args = args_for(&tmp, "# Title\n- ==a==");
        assert!(cmd_render(args, true, HtmlOptions::default(), None).is_ok());
    }

    #[test]
    fn respects_input_limit() {
        let tmp = TempDir::new().unwrap();
        let args = args_for(&tmp, "a long enough paragraph");
        let err = cmd_render(args, false, HtmlOptions::default(), Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }
}
