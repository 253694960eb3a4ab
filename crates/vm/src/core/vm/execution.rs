use serde::Serialize;

use crate::{
    core::{constants::REGISTER_COUNT, opcodes::Instruction, registers::RegisterPolicy},
    error::{serialize_error, VmError},
};

/// [`ExecutionResult`] is the result of running a program to completion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Whether the program stopped on `HALT` rather than an error.
    pub success: bool,

    /// The register file when execution stopped.
    pub registers: [u8; REGISTER_COUNT],

    /// Everything the program printed, concatenated.
    pub output: String,

    /// One entry per fetch cycle, captured before the opcode was fetched.
    #[serde(rename = "execution_steps")]
    pub trace: Vec<TraceEntry>,

    /// The number of fetch cycles, including the one that failed, if any.
    pub steps: u64,

    /// The error that stopped execution, if any.
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<VmError>,
}

/// [`TraceEntry`] is a frozen snapshot of the machine taken before an instruction fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TraceEntry {
    /// The address of the instruction about to be fetched.
    pub pc: u8,

    /// The register file before the instruction executed.
    pub registers: [u8; REGISTER_COUNT],
}

/// [`Step`] describes a single executed instruction. It is returned by [`super::VM::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// The machine state before the instruction was fetched.
    pub before: TraceEntry,

    /// The decoded instruction.
    pub instruction: Instruction,

    /// The program counter after the instruction executed.
    pub pc: u8,
}

/// The run state of a [`super::VM`]. Both halted states are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// The machine will execute the next instruction when stepped.
    #[default]
    Running,

    /// The program executed `HALT`.
    HaltedOk,

    /// The program was stopped by an error.
    HaltedError(VmError),
}

impl State {
    /// Whether the machine can still execute instructions.
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running)
    }

    /// The error that stopped the machine, if any.
    pub fn error(&self) -> Option<VmError> {
        match self {
            State::HaltedError(error) => Some(*error),
            _ => None,
        }
    }
}

/// Execution settings that are not part of the program itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VmOptions {
    /// Stop with [`VmError::StepLimitExceeded`] after this many instructions. `None` lets a
    /// program that never halts run forever.
    pub max_steps: Option<u64>,

    /// How register operands outside R0-R7 are handled.
    pub register_policy: RegisterPolicy,
}

impl VmOptions {
    /// Sets the step limit.
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the step limit from a count where `0` means unlimited, as used by the config file
    /// and the `--max-steps` flag.
    ///
    /// ```
    /// use regvm_vm::core::vm::VmOptions;
    ///
    /// assert_eq!(VmOptions::default().with_step_limit(0).max_steps, None);
    /// assert_eq!(VmOptions::default().with_step_limit(64).max_steps, Some(64));
    /// ```
    pub fn with_step_limit(self, limit: u64) -> Self {
        self.with_max_steps(match limit {
            0 => None,
            limit => Some(limit),
        })
    }

    /// Sets the register policy.
    pub fn with_register_policy(mut self, register_policy: RegisterPolicy) -> Self {
        self.register_policy = register_policy;
        self
    }
}
