use regvm_vm::LoadError;

/// Error type for the Run module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be loaded into memory
    #[error("Load error: {0}")]
    LoadError(#[from] LoadError),

    /// Generic internal error that may occur while running
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
