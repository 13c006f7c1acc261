//! Core library for summark.
//!
//! Two independent, stateless engines for displaying LLM output:
//!
//! - [`markdown`] - a restricted Markdown dialect (with `==highlight==`)
//!   parsed into a block/inline tree and serialized to escaped HTML
//! - [`keywords`] - word-frequency ranking for keyword clouds
//!
//! plus the ambient pieces the `summark` CLI builds on:
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! let html = summark_core::markdown::render("# Findings\n\n- ==critical== gap");
//! assert!(html.contains("<h1>Findings</h1>"));
//!
//! let cloud = summark_core::keywords::extract("risk risk audit");
//! assert_eq!(cloud.len(), 2);
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod keywords;

pub mod markdown;

pub mod word_lists;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use error::{ConfigError, ConfigResult, TableError, TableResult};

pub use keywords::{KeywordEntry, KeywordOptions, KeywordOrder};

pub use markdown::{Document, HtmlOptions};

/// Default cap on input size for CLI and MCP callers (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
