//! CLI error type.

use std::fmt;

use repolens::api::FetchError;
use repolens::config::ConfigError;

/// Errors surfaced to the terminal.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded.
    Config(ConfigError),

    /// A backend fetch failed.
    Fetch(FetchError),

    /// A file could not be read or the server could not bind.
    Io(std::io::Error),

    /// A replay file did not parse.
    Parse(serde_json::Error),

    /// A command argument was invalid.
    InvalidArg(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "configuration error: {}", e),
            CliError::Fetch(e) => write!(f, "fetch failed: {}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Parse(e) => write!(f, "invalid replay file: {}", e),
            CliError::InvalidArg(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Parse(e) => Some(e),
            CliError::InvalidArg(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Parse(e)
    }
}
