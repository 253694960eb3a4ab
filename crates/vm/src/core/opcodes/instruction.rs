use std::fmt::{self, Display};

use super::*;

/// [`Instruction`] is a single decoded instruction: an opcode together with the operand bytes
/// fetched after it. Register operands are kept as raw bytes; they are only checked against the
/// register file when the instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `registers[reg] = value`
    LoadConst {
        /// Destination register.
        reg: u8,
        /// Immediate value.
        value: u8,
    },
    /// `registers[dest] = registers[src]`
    Move {
        /// Destination register.
        dest: u8,
        /// Source register.
        src: u8,
    },
    /// `registers[dest] = registers[src1] + registers[src2]`, wrapping
    Add {
        /// Destination register.
        dest: u8,
        /// Left operand register.
        src1: u8,
        /// Right operand register.
        src2: u8,
    },
    /// `registers[dest] = registers[src1] - registers[src2]`, wrapping
    Sub {
        /// Destination register.
        dest: u8,
        /// Minuend register.
        src1: u8,
        /// Subtrahend register.
        src2: u8,
    },
    /// `registers[dest] = registers[src1] * registers[src2]`, wrapping
    Mul {
        /// Destination register.
        dest: u8,
        /// Left operand register.
        src1: u8,
        /// Right operand register.
        src2: u8,
    },
    /// `registers[dest] = registers[src1] / registers[src2]`, failing on a zero divisor
    Div {
        /// Destination register.
        dest: u8,
        /// Dividend register.
        src1: u8,
        /// Divisor register.
        src2: u8,
    },
    /// `registers[reg] = memory[addr]`
    LoadMem {
        /// Destination register.
        reg: u8,
        /// Memory address to read.
        addr: u8,
    },
    /// `memory[addr] = registers[reg]`
    StoreMem {
        /// Memory address to write.
        addr: u8,
        /// Source register.
        reg: u8,
    },
    /// `pc = addr`
    Jump {
        /// Jump target.
        addr: u8,
    },
    /// `pc = addr` if `registers[reg] == 0`
    JumpIfZero {
        /// Register tested against zero.
        reg: u8,
        /// Jump target.
        addr: u8,
    },
    /// `pc = addr` if bit 7 of `registers[reg]` is set
    JumpIfNeg {
        /// Register whose sign bit is tested.
        reg: u8,
        /// Jump target.
        addr: u8,
    },
    /// push `pc`, then `pc = addr`
    Call {
        /// Subroutine address.
        addr: u8,
    },
    /// pop `pc` if the call stack is non-empty
    Return,
    /// stop execution successfully
    Halt,
    /// append `registers[reg]` in decimal to the output
    Print {
        /// Register to print.
        reg: u8,
    },
    /// an opcode byte outside the instruction set
    Invalid(u8),
}

impl Instruction {
    /// Decodes the instruction for `opcode`, pulling its operand bytes from `next` in encoding
    /// order. Exactly [`OpCodeInfo::operands`] bytes are pulled.
    ///
    /// ```
    /// use regvm_vm::core::opcodes::Instruction;
    ///
    /// let mut operands = [0x02, 0x00, 0x01].into_iter();
    /// let instruction = Instruction::decode(0x03, || operands.next().unwrap_or(0));
    /// assert_eq!(instruction, Instruction::Add { dest: 2, src1: 0, src2: 1 });
    /// ```
    pub fn decode(opcode: u8, mut next: impl FnMut() -> u8) -> Instruction {
        match opcode {
            LOAD_CONST => {
                let (reg, value) = (next(), next());
                Instruction::LoadConst { reg, value }
            }
            MOVE => {
                let (dest, src) = (next(), next());
                Instruction::Move { dest, src }
            }
            ADD => {
                let (dest, src1, src2) = (next(), next(), next());
                Instruction::Add { dest, src1, src2 }
            }
            SUB => {
                let (dest, src1, src2) = (next(), next(), next());
                Instruction::Sub { dest, src1, src2 }
            }
            MUL => {
                let (dest, src1, src2) = (next(), next(), next());
                Instruction::Mul { dest, src1, src2 }
            }
            DIV => {
                let (dest, src1, src2) = (next(), next(), next());
                Instruction::Div { dest, src1, src2 }
            }
            LOAD_MEM => {
                let (reg, addr) = (next(), next());
                Instruction::LoadMem { reg, addr }
            }
            STORE_MEM => {
                let (addr, reg) = (next(), next());
                Instruction::StoreMem { addr, reg }
            }
            JUMP => Instruction::Jump { addr: next() },
            JUMP_IF_ZERO => {
                let (reg, addr) = (next(), next());
                Instruction::JumpIfZero { reg, addr }
            }
            JUMP_IF_NEG => {
                let (reg, addr) = (next(), next());
                Instruction::JumpIfNeg { reg, addr }
            }
            CALL => Instruction::Call { addr: next() },
            RETURN => Instruction::Return,
            HALT => Instruction::Halt,
            PRINT => Instruction::Print { reg: next() },
            _ => Instruction::Invalid(opcode),
        }
    }

    /// Decodes the instruction at the start of `bytes`, or `None` if `bytes` is empty or ends
    /// before all of the instruction's operands.
    ///
    /// ```
    /// use regvm_vm::core::opcodes::Instruction;
    ///
    /// assert_eq!(Instruction::decode_slice(&[0x09, 0x06]), Some(Instruction::Jump { addr: 6 }));
    /// assert_eq!(Instruction::decode_slice(&[0x09]), None);
    /// ```
    pub fn decode_slice(bytes: &[u8]) -> Option<Instruction> {
        let (&opcode, operands) = bytes.split_first()?;
        if operands.len() < OpCodeInfo::from(opcode).operands() as usize {
            return None;
        }

        let mut operands = operands.iter().copied();
        Some(Instruction::decode(opcode, || operands.next().unwrap_or_default()))
    }

    /// The opcode byte this instruction was decoded from.
    pub fn opcode(&self) -> u8 {
        match self {
            Instruction::LoadConst { .. } => LOAD_CONST,
            Instruction::Move { .. } => MOVE,
            Instruction::Add { .. } => ADD,
            Instruction::Sub { .. } => SUB,
            Instruction::Mul { .. } => MUL,
            Instruction::Div { .. } => DIV,
            Instruction::LoadMem { .. } => LOAD_MEM,
            Instruction::StoreMem { .. } => STORE_MEM,
            Instruction::Jump { .. } => JUMP,
            Instruction::JumpIfZero { .. } => JUMP_IF_ZERO,
            Instruction::JumpIfNeg { .. } => JUMP_IF_NEG,
            Instruction::Call { .. } => CALL,
            Instruction::Return => RETURN,
            Instruction::Halt => HALT,
            Instruction::Print { .. } => PRINT,
            Instruction::Invalid(opcode) => *opcode,
        }
    }

    /// The mnemonic of this instruction.
    pub fn name(&self) -> &'static str {
        opcode_name(self.opcode())
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Instruction::LoadConst { reg, value } => write!(f, "{name} r{reg}, {value}"),
            Instruction::Move { dest, src } => write!(f, "{name} r{dest}, r{src}"),
            Instruction::Add { dest, src1, src2 } |
            Instruction::Sub { dest, src1, src2 } |
            Instruction::Mul { dest, src1, src2 } |
            Instruction::Div { dest, src1, src2 } => {
                write!(f, "{name} r{dest}, r{src1}, r{src2}")
            }
            Instruction::LoadMem { reg, addr } => write!(f, "{name} r{reg}, [{addr:#04x}]"),
            Instruction::StoreMem { addr, reg } => write!(f, "{name} [{addr:#04x}], r{reg}"),
            Instruction::Jump { addr } | Instruction::Call { addr } => {
                write!(f, "{name} {addr:#04x}")
            }
            Instruction::JumpIfZero { reg, addr } | Instruction::JumpIfNeg { reg, addr } => {
                write!(f, "{name} r{reg}, {addr:#04x}")
            }
            Instruction::Print { reg } => write!(f, "{name} r{reg}"),
            Instruction::Return | Instruction::Halt => write!(f, "{name}"),
            Instruction::Invalid(opcode) => write!(f, "{name} {opcode:#04x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Instruction> {
        let mut offset = 0;
        let mut out = Vec::new();
        while let Some(instruction) = Instruction::decode_slice(&bytes[offset..]) {
            offset += OpCodeInfo::from(instruction.opcode()).width() as usize;
            out.push(instruction);
        }
        out
    }

    #[test]
    fn test_decode_operand_order() {
        assert_eq!(
            Instruction::decode_slice(&[STORE_MEM, 0x20, 0x03]),
            Some(Instruction::StoreMem { addr: 0x20, reg: 3 })
        );
        assert_eq!(
            Instruction::decode_slice(&[LOAD_MEM, 0x03, 0x20]),
            Some(Instruction::LoadMem { reg: 3, addr: 0x20 })
        );
        assert_eq!(
            Instruction::decode_slice(&[SUB, 0x01, 0x02, 0x03]),
            Some(Instruction::Sub { dest: 1, src1: 2, src2: 3 })
        );
    }

    #[test]
    fn test_decode_program() {
        let program = [0x01, 0x00, 0x05, 0x0c, 0x08, 0x0f, 0x00, 0x0e];
        assert_eq!(
            decode_all(&program),
            vec![
                Instruction::LoadConst { reg: 0, value: 5 },
                Instruction::Call { addr: 8 },
                Instruction::Print { reg: 0 },
                Instruction::Halt,
            ]
        );
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(Instruction::decode_slice(&[0x00]), Some(Instruction::Invalid(0x00)));
        assert_eq!(Instruction::decode_slice(&[0xff, 0x01]), Some(Instruction::Invalid(0xff)));
        assert_eq!(Instruction::decode_slice(&[]), None);
    }

    #[test]
    fn test_opcode_matches_table() {
        for opcode in 0..=255u8 {
            let bytes = [opcode, 0, 0, 0];
            let instruction = Instruction::decode_slice(&bytes).expect("operands are present");
            assert_eq!(instruction.opcode(), opcode);
            assert_eq!(instruction.name(), opcode_name(opcode));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::LoadConst { reg: 0, value: 5 }.to_string(), "LOAD_CONST r0, 5");
        assert_eq!(
            Instruction::Add { dest: 2, src1: 0, src2: 1 }.to_string(),
            "ADD r2, r0, r1"
        );
        assert_eq!(
            Instruction::StoreMem { addr: 0x20, reg: 1 }.to_string(),
            "STORE_MEM [0x20], r1"
        );
        assert_eq!(
            Instruction::JumpIfZero { reg: 0, addr: 0x0f }.to_string(),
            "JUMP_IF_ZERO r0, 0x0f"
        );
        assert_eq!(Instruction::Return.to_string(), "RETURN");
        assert_eq!(Instruction::Invalid(0x42).to_string(), "unknown 0x42");
    }
}
