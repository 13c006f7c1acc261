//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use summark_core::config::{Config, ConfigSources};
use summark_core::keywords::{DEFAULT_MAX_KEYWORDS, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE};
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    max_keywords: usize,
    min_size: f64,
    max_size: f64,
    order: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extra_stop_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlight_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code_class: Option<String>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let keywords = &config.keywords;
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            max_keywords: keywords.max_keywords.unwrap_or(DEFAULT_MAX_KEYWORDS),
            min_size: keywords.min_size.unwrap_or(DEFAULT_MIN_SIZE),
            max_size: keywords.max_size.unwrap_or(DEFAULT_MAX_SIZE),
            order: keywords.order.to_string(),
            extra_stop_words: keywords.stop_words.clone(),
            highlight_class: config.render.highlight_class.clone(),
            code_class: config.render.code_class.clone(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    match cfg.max_input_bytes {
        Some(max) => println!("{}: {max} bytes", "Input limit".dimmed()),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    println!();
    println!("{}", "Keywords".bold().underline());
    println!("{}: {}", "Max keywords".dimmed(), cfg.max_keywords);
    println!(
        "{}: {:.1} to {:.1}",
        "Size range".dimmed(),
        cfg.min_size,
        cfg.max_size
    );
    println!("{}: {}", "Order".dimmed(), cfg.order);
    if !cfg.extra_stop_words.is_empty() {
        println!(
            "{}: {}",
            "Extra stop words".dimmed(),
            cfg.extra_stop_words.join(", ")
        );
    }

    println!();
    println!("{}", "Render".bold().underline());
    print_opt("Highlight class", cfg.highlight_class.as_deref());
    print_opt("Code class", cfg.code_class.as_deref());

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt(label: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}
