//! Keywords command: build a keyword cloud from a text file.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use summark_core::config::Config;
use summark_core::keywords::{self, KeywordEntry, KeywordOrder};
use summark_core::markdown;

use super::read_input_file;

/// Message printed when no word qualifies.
pub const EMPTY_CLOUD_MESSAGE: &str = "Not enough content to generate a keyword cloud.";

/// Arguments for the `keywords` subcommand.
#[derive(Args, Debug, Default)]
pub struct KeywordsArgs {
    /// Text or Markdown file to scan (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Maximum number of keywords (overrides config; default 50).
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Display order (overrides config).
    #[arg(long, value_enum)]
    pub order: Option<KeywordOrder>,

    /// Seed for a reproducible shuffle.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Extra stop word (repeatable).
    #[arg(long = "stop-word", value_name = "WORD")]
    pub stop_words: Vec<String>,

    /// Parse the input as Markdown and scan only its visible text.
    #[arg(long)]
    pub strip_markdown: bool,
}

/// Extract keywords and print one per line, or JSON records with `--json`.
#[instrument(name = "cmd_keywords", skip_all, fields(file = %args.file))]
pub fn cmd_keywords(
    args: KeywordsArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        limit = ?args.limit,
        order = ?args.order,
        seed = ?args.seed,
        "executing keywords command"
    );

    let content = read_input_file(&args.file, max_input)?;
    let text = if args.strip_markdown {
        markdown::parse(&content).plain_text()
    } else {
        content
    };

    let mut options = config.keyword_options().with_stop_words(&args.stop_words);
    if let Some(limit) = args.limit {
        options = options.with_max_keywords(limit);
    }
    let order = args.order.unwrap_or(config.keywords.order);
    let mut shuffle = order.shuffler(args.seed);

    let entries = keywords::extract_with(&text, &options, shuffle.as_mut());

    if global_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("{}", EMPTY_CLOUD_MESSAGE.yellow());
    } else {
        print_entries(&entries);
    }

    Ok(())
}

fn print_entries(entries: &[KeywordEntry]) {
    let width = entries.iter().map(|e| e.text.len()).max().unwrap_or(0);
    for entry in entries {
        println!(
            "{:<width$}  {:>4}  {}",
            entry.text.bold(),
            entry.value,
            format!("{:.2}", entry.size).dimmed(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_with(tmp: &TempDir, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(tmp.path().join("notes.md")).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn prints_entries() {
        let tmp = TempDir::new().unwrap();
        let args = KeywordsArgs {
            file: file_with(&tmp, "audit audit risk"),
            order: Some(KeywordOrder::Ranked),
            ..KeywordsArgs::default()
        };
        assert!(cmd_keywords(args, false, &Config::default(), None).is_ok());
    }

    #[test]
    fn empty_cloud_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let args = KeywordsArgs {
            file: file_with(&tmp, "the and 12345"),
            ..KeywordsArgs::default()
        };
        assert!(cmd_keywords(args, true, &Config::default(), None).is_ok());
    }

    #[test]
    fn strip_markdown_and_seed() {
        let tmp = TempDir::new().unwrap();
        let args = KeywordsArgs {
            file: file_with(&tmp, "## Findings\n- **vendor** risk\n|vendor|exposure|"),
            seed: Some(1),
            strip_markdown: true,
            stop_words: vec!["risk".to_string()],
            ..KeywordsArgs::default()
        };
        assert!(cmd_keywords(args, false, &Config::default(), None).is_ok());
    }
}
