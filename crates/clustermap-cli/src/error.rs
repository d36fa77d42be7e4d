//! Error types for the cluster map CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use clustermap_core::error::CoreError;
use thiserror::Error;

// Re-export core error types so command modules can use them via crate::error
pub use clustermap_core::error::{ConfigError, DecodeError, StorageError, TransportError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DECODE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Map unavailable: {0}")]
    MapUnavailable(String),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Decode(_) => exit_codes::DECODE_ERROR,
                CoreError::Transport(_) => exit_codes::NETWORK_ERROR,
                CoreError::Storage(StorageError::InvalidName(_)) => exit_codes::INVALID_ARGS,
                CoreError::Storage(StorageError::Corrupt { .. }) => exit_codes::DECODE_ERROR,
                CoreError::Storage(_) => exit_codes::GENERAL_ERROR,
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
                CoreError::Io(_) => exit_codes::GENERAL_ERROR,
                CoreError::Other(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::MapUnavailable(_) => exit_codes::NETWORK_ERROR,
            CliError::Other(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

// Conversions from core error subtypes to CliError
impl From<DecodeError> for CliError {
    fn from(e: DecodeError) -> Self {
        CliError::Core(CoreError::Decode(e))
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        CliError::Core(CoreError::Transport(e))
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Core(CoreError::Storage(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let decode: CliError = DecodeError::MissingHostname { index: 0 }.into();
        assert_eq!(decode.exit_code(), exit_codes::DECODE_ERROR);

        let invalid: CliError = StorageError::InvalidName("../x".to_string()).into();
        assert_eq!(invalid.exit_code(), exit_codes::INVALID_ARGS);

        let unavailable = CliError::MapUnavailable("down".to_string());
        assert_eq!(unavailable.exit_code(), exit_codes::NETWORK_ERROR);
    }
}
