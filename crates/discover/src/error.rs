//! Error types for the discover crate.

use thiserror::Error;

/// Errors raised while reading a discovery document.
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error(
        "Source database `{schema}` does not appear in the discover result, or the database has no tables. Available databases are: {available:?}"
    )]
    SchemaNotFound {
        schema: String,
        available: Vec<String>,
    },

    #[error(
        "Source table `{table}` does not appear in the database `{schema}`. Available tables are: {available:?}"
    )]
    TableNotFound {
        schema: String,
        table: String,
        available: Vec<String>,
    },

    #[error("Invalid discover result: {0}")]
    InvalidDocument(String),

    #[error("Failed to parse discover result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read discover result: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for discover operations.
pub type Result<T> = std::result::Result<T, DiscoverError>;
