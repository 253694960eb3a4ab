//! The Run module loads regvm bytecode into a fresh machine, runs it to completion, and renders
//! the [`ExecutionResult`](regvm_vm::core::vm::ExecutionResult) for humans or as JSON.

/// Error types for the run module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{display, run, to_json};
pub use error::Error;
pub use interfaces::{RunArgs, RunArgsBuilder};
