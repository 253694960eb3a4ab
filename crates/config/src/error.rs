//! Error types for the configuration module

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic error with a message
    #[error("Error: {0}")]
    Generic(String),

    /// An error that occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A key passed to `config` that the configuration does not have
    #[error("invalid key: '{0}' is not a valid configuration key.")]
    InvalidKey(String),

    /// A key passed to `config` without a value to set it to
    #[error("found key '{0}' but no value to set. use `regvm config --help` for more information.")]
    MissingValue(String),
}
