use tracing::{debug, warn};

#[cfg(feature = "step-tracing")]
use tracing::trace;

use crate::{
    core::{memory::Memory, opcodes::Instruction, registers::Registers, stack::CallStack},
    error::{LoadError, VmError},
};

use super::{
    execution::{ExecutionResult, State, Step, TraceEntry, VmOptions},
    handlers,
};

/// The [`VM`] struct represents a register machine instance. \
/// It contains the machine's [`Registers`], [`Memory`], [`CallStack`], program counter, output
/// buffer, and run state. A machine is meant to run a single program; construct a fresh one for
/// every execution.
#[derive(Clone, Debug)]
pub struct VM {
    /// The register file, R0 through R7.
    pub registers: Registers,

    /// The 256-byte memory holding both the program and its data.
    pub memory: Memory,

    /// The address of the next byte to fetch.
    pub pc: u8,

    /// Return addresses pushed by `CALL`.
    pub call_stack: CallStack,

    /// Decimal values appended by `PRINT`.
    pub output: String,

    /// Whether the machine is running, halted, or stopped by an error.
    pub state: State,

    /// Snapshots taken before each fetch cycle.
    pub trace: Vec<TraceEntry>,

    /// The number of fetch cycles started so far.
    pub steps: u64,

    /// Execution settings.
    pub options: VmOptions,
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}

impl VM {
    /// Creates a new [`VM`] with zeroed registers and memory, no step limit, and the faulting
    /// register policy.
    ///
    /// ```
    /// use regvm_vm::core::vm::VM;
    ///
    /// let vm = VM::new();
    /// assert_eq!(vm.pc, 0);
    /// assert!(vm.state.is_running());
    /// ```
    pub fn new() -> VM {
        Self::with_options(VmOptions::default())
    }

    /// Creates a new [`VM`] with the given execution settings.
    ///
    /// ```
    /// use regvm_vm::core::vm::{VM, VmOptions};
    ///
    /// let vm = VM::with_options(VmOptions::default().with_max_steps(Some(100)));
    /// assert_eq!(vm.options.max_steps, Some(100));
    /// ```
    pub fn with_options(options: VmOptions) -> VM {
        VM {
            registers: Registers::new(options.register_policy),
            memory: Memory::new(),
            pc: 0,
            call_stack: CallStack::new(),
            output: String::new(),
            state: State::Running,
            trace: Vec::new(),
            steps: 0,
            options,
        }
    }

    /// Copies `bytecode` into memory at address 0 and points the program counter at it. Memory
    /// past the end of the bytecode is left as it was.
    ///
    /// ```
    /// use regvm_vm::core::vm::VM;
    ///
    /// let mut vm = VM::new();
    /// vm.load(&[0x0e]).expect("failed to load bytecode");
    /// assert_eq!(vm.memory.read(0), 0x0e);
    ///
    /// assert!(vm.load(&[0u8; 257]).is_err());
    /// ```
    pub fn load(&mut self, bytecode: &[u8]) -> Result<(), LoadError> {
        if let Err(e) = self.memory.load(bytecode) {
            warn!("refusing to load bytecode: {}", e);
            return Err(e);
        }
        self.pc = 0;

        debug!(size = bytecode.len(), "loaded bytecode");
        Ok(())
    }

    /// Reads the byte at the program counter and advances it, wrapping from 255 back to 0.
    ///
    /// ```
    /// use regvm_vm::core::vm::VM;
    ///
    /// let mut vm = VM::new();
    /// vm.pc = 0xff;
    /// vm.fetch_byte();
    /// assert_eq!(vm.pc, 0);
    /// ```
    #[inline]
    pub fn fetch_byte(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Moves the machine into its terminal error state, returning the error for propagation.
    fn fail(&mut self, error: VmError) -> VmError {
        debug!(pc = self.pc, %error, "execution stopped");
        self.state = State::HaltedError(error);
        error
    }

    /// Executes the next instruction, returning what was executed. \
    /// An error stops the machine for good; stepping a machine that is no longer running returns
    /// [`VmError::Halted`] and changes nothing.
    ///
    /// ```
    /// use regvm_vm::core::{opcodes::Instruction, vm::VM};
    ///
    /// let mut vm = VM::new();
    /// vm.load(&[0x01, 0x00, 0x2a, 0x0e]).expect("failed to load bytecode");
    ///
    /// let step = vm.step().expect("step failed");
    /// assert_eq!(step.instruction, Instruction::LoadConst { reg: 0, value: 42 });
    /// assert_eq!(step.before.pc, 0);
    /// assert_eq!(step.pc, 3);
    /// ```
    pub fn step(&mut self) -> Result<Step, VmError> {
        if !self.state.is_running() {
            return Err(VmError::Halted);
        }

        if let Some(limit) = self.options.max_steps {
            if self.steps >= limit {
                warn!("step limit of {} reached before HALT", limit);
                return Err(self.fail(VmError::StepLimitExceeded(limit)));
            }
        }

        // snapshot before the fetch, so the trace shows the state the instruction ran against
        let before = TraceEntry { pc: self.pc, registers: self.registers.snapshot() };
        self.trace.push(before);
        self.steps += 1;

        let opcode = self.fetch_byte();
        let instruction = Instruction::decode(opcode, || self.fetch_byte());

        #[cfg(feature = "step-tracing")]
        trace!(pc = before.pc, instruction = %instruction, "executing instruction");

        self.execute_instruction(instruction).map_err(|error| self.fail(error))?;

        Ok(Step { before, instruction, pc: self.pc })
    }

    /// Applies a decoded instruction to the machine.
    fn execute_instruction(&mut self, instruction: Instruction) -> Result<(), VmError> {
        match instruction {
            Instruction::LoadConst { reg, value } => {
                handlers::memory::load_const(self, reg, value)
            }
            Instruction::Move { dest, src } => handlers::memory::mov(self, dest, src),
            Instruction::LoadMem { reg, addr } => handlers::memory::load_mem(self, reg, addr),
            Instruction::StoreMem { addr, reg } => handlers::memory::store_mem(self, addr, reg),

            Instruction::Add { dest, src1, src2 } => {
                handlers::arithmetic::add(self, dest, src1, src2)
            }
            Instruction::Sub { dest, src1, src2 } => {
                handlers::arithmetic::sub(self, dest, src1, src2)
            }
            Instruction::Mul { dest, src1, src2 } => {
                handlers::arithmetic::mul(self, dest, src1, src2)
            }
            Instruction::Div { dest, src1, src2 } => {
                handlers::arithmetic::div(self, dest, src1, src2)
            }

            Instruction::Jump { addr } => handlers::control::jump(self, addr),
            Instruction::JumpIfZero { reg, addr } => {
                handlers::control::jump_if_zero(self, reg, addr)
            }
            Instruction::JumpIfNeg { reg, addr } => handlers::control::jump_if_neg(self, reg, addr),
            Instruction::Call { addr } => handlers::control::call(self, addr),
            Instruction::Return => handlers::control::op_return(self),
            Instruction::Halt => handlers::control::halt(self),

            Instruction::Print { reg } => handlers::io::print(self, reg),

            Instruction::Invalid(opcode) => Err(VmError::InvalidOpcode(opcode)),
        }
    }

    /// Runs until the program halts or fails, and returns the result. Running a machine that has
    /// already stopped returns its recorded result without executing anything.
    ///
    /// ```
    /// use regvm_vm::core::vm::VM;
    ///
    /// let mut vm = VM::new();
    /// vm.load(&[0x01, 0x00, 0x07, 0x0f, 0x00, 0x0e]).expect("failed to load bytecode");
    ///
    /// let result = vm.run();
    /// assert!(result.success);
    /// assert_eq!(result.output, "7");
    /// assert_eq!(result.trace.len(), 3);
    /// ```
    pub fn run(&mut self) -> ExecutionResult {
        while self.state.is_running() {
            if self.step().is_err() {
                break;
            }
        }

        debug!(steps = self.steps, success = self.state == State::HaltedOk, "execution finished");
        self.result()
    }

    /// Builds an [`ExecutionResult`] from the machine's current state.
    pub fn result(&self) -> ExecutionResult {
        ExecutionResult {
            success: self.state == State::HaltedOk,
            registers: self.registers.snapshot(),
            output: self.output.clone(),
            trace: self.trace.clone(),
            steps: self.steps,
            error: self.state.error(),
        }
    }

    /// Resets the registers, program counter, call stack, output, trace, and run state. Memory is
    /// kept, so the loaded program can be run again.
    ///
    /// ```
    /// use regvm_vm::core::vm::VM;
    ///
    /// let mut vm = VM::new();
    /// vm.load(&[0x0e]).expect("failed to load bytecode");
    /// vm.run();
    /// assert!(!vm.state.is_running());
    ///
    /// vm.reset();
    /// assert!(vm.state.is_running());
    /// assert!(vm.trace.is_empty());
    /// ```
    pub fn reset(&mut self) {
        self.registers.clear();
        self.pc = 0;
        self.call_stack.clear();
        self.output.clear();
        self.trace.clear();
        self.steps = 0;
        self.state = State::Running;
    }

    /// Loads `bytecode` into a fresh machine and runs it to completion.
    ///
    /// ```
    /// use regvm_vm::core::vm::{VM, VmOptions};
    ///
    /// let result = VM::run_program(&[0x0f, 0x00, 0x0e], VmOptions::default())
    ///     .expect("failed to load bytecode");
    /// assert_eq!(result.output, "0");
    /// ```
    pub fn run_program(bytecode: &[u8], options: VmOptions) -> Result<ExecutionResult, LoadError> {
        let mut vm = VM::with_options(options);
        vm.load(bytecode)?;
        Ok(vm.run())
    }
}
