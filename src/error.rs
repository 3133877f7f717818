// src/error.rs

//! Error types for relic conversions
//!
//! Per-collection problems (missing source collection, a conversion that
//! produced nothing, a rejected registration) are logged and counted, never
//! raised. `Error` covers the structural failures only.

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion or configuration load
#[derive(Error, Debug)]
pub enum Error {
    /// Converter configuration could not be parsed
    #[error("invalid converter config: {0}")]
    Config(#[from] toml::de::Error),

    /// Converter configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection with this name is already present in the store
    #[error("collection already registered: {0}")]
    DuplicateCollection(String),

    /// The event header could not be placed into the target store
    #[error("could not register event header: {0}")]
    Header(String),
}
