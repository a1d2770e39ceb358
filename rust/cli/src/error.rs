//! Error types for the CLI application.

use crate::config::ConfigError;
use coexist_server::ServerError;
use thiserror::Error;

/// Every failure a subcommand can report. Each maps to exit code `2`
/// except [`CliError::Interrupted`], which maps to `130`.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, terminal input, socket traffic)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// Could not reach the match server
    #[error("Connection error: {0}")]
    Connection(String),

    /// Operation was interrupted (e.g., by user with Ctrl+C)
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_with_context() {
        let err: CliError = ConfigError::Invalid("host must not be empty".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration: host must not be empty"
        );
    }

    #[test]
    fn io_errors_keep_source() {
        use std::error::Error as _;
        let err: CliError = std::io::Error::other("pipe closed").into();
        assert!(err.source().is_some());
    }
}
