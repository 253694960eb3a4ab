//! The Disassembler module converts regvm bytecode into a readable listing of instructions.
//!
//! Bytecode is walked linearly from address 0, one instruction per line. Bytes are never
//! interpreted as data, so a listing of a program that embeds data between instructions shows
//! that data decoded as instructions.

/// Error types for the disassembler module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{disassemble, disassemble_bytes};
pub use error::Error;
pub use interfaces::{DisassemblerArgs, DisassemblerArgsBuilder};
