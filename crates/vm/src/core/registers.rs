use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::VmError;

use super::constants::REGISTER_COUNT;

/// How a register operand outside R0-R7 is treated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RegisterPolicy {
    /// Stop the program with [`VmError::IndexFault`].
    #[default]
    Fault,

    /// Reduce the index modulo the number of registers.
    Mask,
}

impl Display for RegisterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterPolicy::Fault => write!(f, "fault"),
            RegisterPolicy::Mask => write!(f, "mask"),
        }
    }
}

impl std::str::FromStr for RegisterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fault" => Ok(RegisterPolicy::Fault),
            "mask" => Ok(RegisterPolicy::Mask),
            _ => Err(format!("invalid register policy: {s}")),
        }
    }
}

/// The [`Registers`] struct represents the machine's register file, R0 through R7.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Registers {
    /// The register values, R0 first.
    pub registers: [u8; REGISTER_COUNT],

    /// The policy applied to out-of-range register operands.
    pub policy: RegisterPolicy,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new(RegisterPolicy::default())
    }
}

impl Registers {
    /// Creates a zeroed register file using the given out-of-range policy.
    pub fn new(policy: RegisterPolicy) -> Registers {
        Registers { registers: [0u8; REGISTER_COUNT], policy }
    }

    /// Maps a raw register operand to a slot in the register file.
    ///
    /// ```
    /// use regvm_vm::core::registers::{RegisterPolicy, Registers};
    ///
    /// let faulting = Registers::new(RegisterPolicy::Fault);
    /// assert_eq!(faulting.resolve(7), Ok(7));
    /// assert!(faulting.resolve(8).is_err());
    ///
    /// let masking = Registers::new(RegisterPolicy::Mask);
    /// assert_eq!(masking.resolve(9), Ok(1));
    /// ```
    pub fn resolve(&self, index: u8) -> Result<usize, VmError> {
        let slot = index as usize;
        if slot < REGISTER_COUNT {
            return Ok(slot);
        }

        match self.policy {
            RegisterPolicy::Fault => Err(VmError::IndexFault(index)),
            RegisterPolicy::Mask => Ok(slot % REGISTER_COUNT),
        }
    }

    /// Reads the register named by `index`.
    pub fn get(&self, index: u8) -> Result<u8, VmError> {
        Ok(self.registers[self.resolve(index)?])
    }

    /// Writes `value` to the register named by `index`.
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), VmError> {
        let slot = self.resolve(index)?;
        self.registers[slot] = value;
        Ok(())
    }

    /// Returns a point-in-time copy of every register.
    #[inline]
    pub fn snapshot(&self) -> [u8; REGISTER_COUNT] {
        self.registers
    }

    /// Zeroes every register, keeping the policy.
    pub fn clear(&mut self) {
        self.registers = [0u8; REGISTER_COUNT];
    }
}
