//! Logging setup.
//!
//! Two layers share one registry: a compact stderr layer for humans and a
//! JSON-lines file layer for later inspection. The stderr layer follows the
//! `-q`/`-v` flags only. The file layer uses `RUST_LOG` when set, else the
//! same flags, else the configured `log_level`.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "summark.jsonl";

/// Env var naming an explicit log file.
pub const LOG_PATH_ENV: &str = "SUMMARK_LOG_PATH";

/// Env var naming a log directory.
pub const LOG_DIR_ENV: &str = "SUMMARK_LOG_DIR";

/// Where the JSON-lines log goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Directory holding the log file, or `None` to skip file logging.
    pub log_dir: Option<PathBuf>,
    /// File name inside `log_dir`.
    pub file_name: String,
}

impl ObservabilityConfig {
    /// Resolve the log location from the environment, then `config_log_dir`,
    /// then the platform data directory.
    ///
    /// Precedence: `SUMMARK_LOG_PATH` > `SUMMARK_LOG_DIR` > config > default.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            summark_core::config::user_data_local_dir()
                .map(|dir| dir.join("logs").into_std_path_buf()),
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        default_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = log_path
            && let Some(file_name) = path.file_name().and_then(|n| n.to_str())
        {
            return Self {
                file_name: file_name.to_string(),
                log_dir: Some(
                    path.parent()
                        .map_or_else(|| PathBuf::from("."), PathBuf::from),
                ),
            };
        }
        Self {
            log_dir: env_dir.or(config_dir).or(default_dir),
            file_name: LOG_FILE_NAME.to_string(),
        }
    }
}

/// Level directive chosen by the CLI flags.
pub const fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Build the file-layer filter: `RUST_LOG` if set, else the flag-derived level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(quiet, verbose, default_level)))
}

/// Stderr verbosity: warnings by default, errors with `-q`, more with `-v`.
pub const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard; keep it alive until exit so buffered
/// lines are flushed. If the log directory cannot be created, logging
/// continues on stderr only.
pub fn init_observability(
    config: &ObservabilityConfig,
    file_filter: EnvFilter,
    stderr_filter: LevelFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match open_log_file(config) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(stderr_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn open_log_file(config: &ObservabilityConfig) -> Option<RollingFileAppender> {
    let dir = config.log_dir.as_ref()?;
    std::fs::create_dir_all(dir).ok()?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(config.file_name.as_str())
        .build(dir)
        .ok()
}
