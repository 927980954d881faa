//! Error types shared across the echo crates.

use std::io;
use thiserror::Error;

/// Result type for fallible echo operations.
pub type EchoResult<T> = Result<T, EchoError>;

/// Errors raised at the edges of the simulator: string input, config and
/// debug image export. Scene setters clamp instead of failing.
#[derive(Error, Debug)]
pub enum EchoError {
    /// Parameter name not recognised
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Value could not be parsed for the named parameter
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidValue { name: String, value: String },

    /// Configuration could not be decoded
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Filesystem failure while exporting a frame
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Image encoder failure
    #[error("Image error: {0}")]
    Image(String),
}

impl EchoError {
    pub fn invalid_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue { name: name.into(), value: value.into() }
    }
}
