//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Malformed trace data (dangling parents, duplicate ids, missing processes)
//! is never an error here. Those cases fall back and get logged instead.

use thiserror::Error;

/// Errors raised by the derivation functions
///
/// Only caller mistakes end up here, never bad trace data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur during trace parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a view configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
