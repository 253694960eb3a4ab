#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Config error: {0}")]
    ConfigError(#[from] regvm_config::error::Error),
    #[error("Disassemble error: {0}")]
    DisassembleError(#[from] regvm_disassembler::Error),
    #[error("Run error: {0}")]
    RunError(#[from] regvm_run::Error),
}
