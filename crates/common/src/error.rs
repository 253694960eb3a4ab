/// Errors that can occur while resolving a bytecode target.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target file could not be read.
    #[error("Filesystem error: {0}")]
    FilesystemError(#[from] std::io::Error),

    /// The target is not valid hex.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<eyre::Report> for Error {
    fn from(e: eyre::Report) -> Self {
        Error::ParseError(e.to_string())
    }
}
