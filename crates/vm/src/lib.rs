//! regvm register machine
//!
//! This crate provides the bytecode interpreter at the heart of regvm: an 8-register,
//! 256-byte machine with a fixed, closed instruction set, a call stack for subroutines, and a
//! per-instruction execution trace.

/// Core VM implementation, including memory, registers, the call stack, and opcodes
pub mod core;

/// Error types raised while loading or executing a program
pub mod error;

pub use error::{LoadError, VmError};
