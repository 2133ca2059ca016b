//! Top-level error types for the command line tool.
//!
//! Pipeline failures arrive as [`crate::bundler::Error`]; this module adds the
//! configuration and argument errors that happen before a pipeline exists.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file parse errors
    #[error("Config error in {}: {source}", path.display())]
    Config {
        /// Config file that failed to parse
        path: PathBuf,
        /// Parser message
        #[source]
        source: toml::de::Error,
    },

    /// Pipeline errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl BundlerError {
    /// Exit code reported for this error.
    ///
    /// Argument and configuration problems exit with 2, pipeline failures with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cli(_) | Self::Config { .. } => 2,
            _ => 1,
        }
    }
}
