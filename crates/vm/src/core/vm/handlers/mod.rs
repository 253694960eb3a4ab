//! Instruction handlers organized by category.
//!
//! Each submodule contains handler functions for related opcodes.

/// Arithmetic operations: ADD, SUB, MUL, DIV
pub mod arithmetic;

/// Control flow: JUMP, JUMP_IF_ZERO, JUMP_IF_NEG, CALL, RETURN, HALT
pub mod control;

/// Output: PRINT
pub mod io;

/// Register and memory transfers: LOAD_CONST, MOVE, LOAD_MEM, STORE_MEM
pub mod memory;
