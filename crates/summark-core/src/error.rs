//! Error types for summark-core.
//!
//! Rendering and keyword extraction have no failure modes. Errors only come
//! from loading configuration and from decoding JSON handed to the table
//! builder.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when turning extracted JSON into a Markdown table.
#[derive(Error, Debug)]
pub enum TableError {
    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was valid JSON but not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// The JSON type that was found instead (e.g. "array").
        found: &'static str,
    },
}

/// Result type alias using [`TableError`].
pub type TableResult<T> = Result<T, TableError>;
