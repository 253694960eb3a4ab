//! Opcodes and related utilities.
//!
//! This module provides:
//! - a constant for every opcode byte, generated together with its metadata
//! - opcode information (mnemonic and operand count)
//! - the decoded [`Instruction`] representation matched by the interpreter

/// Decoded instructions and the decoder that produces them.
pub mod instruction;
pub use instruction::Instruction;

/// Information about an opcode, such as its mnemonic and the number of operand bytes that follow
/// it in the bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpCodeInfo {
    /// Mnemonic
    name: &'static str,
    /// Operand bytes following the opcode.
    operands: u8,
}

impl OpCodeInfo {
    /// Creates a new opcode info with the given name and default values.
    pub const fn new(name: &'static str) -> Self {
        Self { name, operands: 0 }
    }

    /// Returns the mnemonic of the opcode.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of operand bytes.
    #[inline]
    pub const fn operands(&self) -> u8 {
        self.operands
    }

    /// Returns the total encoded width of the instruction, opcode byte included.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.operands + 1
    }
}

impl From<u8> for OpCodeInfo {
    #[inline]
    fn from(opcode: u8) -> Self {
        OPCODE_INFO_TABLE[opcode as usize].unwrap_or(OpCodeInfo::new("unknown"))
    }
}

/// Sets the number of operand bytes.
#[inline]
pub const fn operands(mut op: OpCodeInfo, count: u8) -> OpCodeInfo {
    op.operands = count;
    op
}

macro_rules! opcodes {
    ($($val:literal => $name:ident => $($modifier:ident $(( $($modifier_arg:expr),* ))?),*);* $(;)?) => {
        // create a constant for each opcode
        $(
            #[doc = concat!("The `", stringify!($val), "` (\"", stringify!($name),"\") opcode.")]
            pub const $name: u8 = $val;
        )*

        /// Maps each opcode to its info.
        pub const OPCODE_INFO_TABLE: [Option<OpCodeInfo>; 256] = {
            let mut map = [None; 256];
            let mut prev: u8 = 0;
            $(
                let val: u8 = $val;
                assert!(val > prev, "opcodes must be sorted in ascending order");
                prev = val;
                let info = OpCodeInfo::new(
                    stringify!($name)
                );
                $(
                let info = $modifier(info, $($($modifier_arg),*)?);
                )*
                map[$val] = Some(info);
            )*
            let _ = prev;
            map
        };

        /// Maps each opcode to its name. (So we dont need to load [`OpCodeInfo`] to get the name)
        pub const OPCODE_NAME_TABLE: [&'static str; 256] = {
            let mut map = ["unknown"; 256];
            $(
                map[$val] = stringify!($name);
            )*
            map
        };
    }
}

/// Get the mnemonic of an opcode.
///
/// ```
/// use regvm_vm::core::opcodes::opcode_name;
///
/// assert_eq!(opcode_name(0x01), "LOAD_CONST");
/// assert_eq!(opcode_name(0x00), "unknown");
/// ```
#[inline]
pub fn opcode_name(opcode: u8) -> &'static str {
    OPCODE_NAME_TABLE[opcode as usize]
}

opcodes! {
    0x01 => LOAD_CONST => operands(2);
    0x02 => MOVE => operands(2);

    0x03 => ADD => operands(3);
    0x04 => SUB => operands(3);
    0x05 => MUL => operands(3);
    0x06 => DIV => operands(3);

    0x07 => LOAD_MEM => operands(2);
    0x08 => STORE_MEM => operands(2);

    0x09 => JUMP => operands(1);
    0x0a => JUMP_IF_ZERO => operands(2);
    0x0b => JUMP_IF_NEG => operands(2);
    0x0c => CALL => operands(1);
    0x0d => RETURN => operands(0);

    0x0e => HALT => operands(0);
    0x0f => PRINT => operands(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_table_is_closed() {
        let valid = (0..=255u8)
            .filter(|op| OPCODE_INFO_TABLE[*op as usize].is_some())
            .collect::<Vec<u8>>();
        assert_eq!(valid, (0x01..=0x0f).collect::<Vec<u8>>());
    }

    #[test]
    fn test_operand_counts() {
        assert_eq!(OpCodeInfo::from(LOAD_CONST).operands(), 2);
        assert_eq!(OpCodeInfo::from(ADD).operands(), 3);
        assert_eq!(OpCodeInfo::from(JUMP).operands(), 1);
        assert_eq!(OpCodeInfo::from(RETURN).operands(), 0);
        assert_eq!(OpCodeInfo::from(PRINT).width(), 2);
    }

    #[test]
    fn test_unknown_opcode_info() {
        assert_eq!(OpCodeInfo::from(0x10).name(), "unknown");
        assert_eq!(OpCodeInfo::from(0x00).width(), 1);
    }

    #[test]
    fn test_names() {
        assert_eq!(opcode_name(JUMP_IF_ZERO), "JUMP_IF_ZERO");
        assert_eq!(opcode_name(HALT), "HALT");
        assert_eq!(opcode_name(0xff), "unknown");
    }
}
