//! Error types for the virtual machine

use serde::Serializer;

use crate::core::constants::MEMORY_SIZE;

/// Errors raised by [`crate::core::vm::VM::load`] before any instruction runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The bytecode does not fit in memory.
    #[error("bytecode is {size} bytes, but memory holds only {capacity}")]
    TooLarge {
        /// Length of the rejected bytecode
        size: usize,
        /// Memory capacity in bytes
        capacity: usize,
    },
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::TooLarge { size, capacity: MEMORY_SIZE }
    }
}

/// Errors that stop a running program. Every variant except [`VmError::Halted`] is terminal and
/// is reported in the [`crate::core::vm::ExecutionResult`] of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum VmError {
    /// `DIV` was executed with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// The fetched opcode byte is not part of the instruction set.
    #[error("Invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    /// A register operand referenced a register outside R0-R7.
    #[error("Register index out of range: {0}")]
    IndexFault(u8),

    /// The configured step limit was reached before the program halted.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(u64),

    /// The machine has already stopped and cannot execute further instructions.
    #[error("Machine is not running")]
    Halted,
}

/// Serializes an optional [`VmError`] as its display string, matching the transport's JSON
/// `error` field.
pub(crate) fn serialize_error<S>(error: &Option<VmError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_str(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
