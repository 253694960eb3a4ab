/// Constants describing the machine's fixed dimensions
pub mod constants;

/// Memory implementation for the 256-byte address space
pub mod memory;

/// Opcode definitions and instruction decoding
pub mod opcodes;

/// Register file implementation
pub mod registers;

/// Call stack implementation for CALL / RETURN
pub mod stack;

/// Core virtual machine implementation
pub mod vm;
