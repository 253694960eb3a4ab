//! Common utilities, constants, and resources used across the regvm codebase.
//!
//! This crate provides shared functionality for the regvm toolkit: reading bytecode targets, hex
//! encoding and decoding, and file helpers.

/// Resolving bytecode from a hex string or a file.
pub mod bytecode;

/// Constants used throughout the regvm codebase.
pub mod constants;

/// Error types for the common module.
pub mod error;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;
