use crate::error::LoadError;

use super::constants::MEMORY_SIZE;

/// The [`Memory`] struct represents the machine's flat, byte-addressed memory. \
/// Program bytecode and data share the same 256 cells, so a program may read (and overwrite) its
/// own instructions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Memory {
    /// The memory cells, indexed directly by an 8-bit address
    pub memory: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a new [`Memory`] with every cell set to zero.
    ///
    /// ```
    /// use regvm_vm::core::memory::Memory;
    ///
    /// let memory = Memory::new();
    /// assert_eq!(memory.size(), 256);
    /// assert_eq!(memory.read(0xff), 0);
    /// ```
    pub fn new() -> Memory {
        Memory { memory: [0u8; MEMORY_SIZE] }
    }

    /// Gets the size of the memory in bytes.
    pub fn size(&self) -> usize {
        self.memory.len()
    }

    /// Copies `bytecode` into memory starting at address 0. \
    /// Cells past the end of `bytecode` keep whatever value they held before. Bytecode longer than
    /// the memory is rejected and leaves memory untouched.
    ///
    /// ```
    /// use regvm_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.write(5, 0xaa);
    /// memory.load(&[1, 2, 3]).expect("failed to load bytecode");
    /// assert_eq!(memory.read(2), 3);
    /// assert_eq!(memory.read(5), 0xaa);
    ///
    /// assert!(memory.load(&[0u8; 257]).is_err());
    /// ```
    pub fn load(&mut self, bytecode: &[u8]) -> Result<(), LoadError> {
        if bytecode.len() > self.size() {
            return Err(LoadError::too_large(bytecode.len()));
        }

        self.memory[..bytecode.len()].copy_from_slice(bytecode);
        Ok(())
    }

    /// Reads the byte stored at `address`.
    #[inline]
    pub fn read(&self, address: u8) -> u8 {
        self.memory[address as usize]
    }

    /// Stores `value` at `address`.
    #[inline]
    pub fn write(&mut self, address: u8, value: u8) {
        self.memory[address as usize] = value;
    }
}
