use std::time::Instant;

use crate::{error::Error, interfaces::DisassemblerArgs};
use eyre::eyre;
use regvm_vm::core::opcodes::{Instruction, OpCodeInfo};
use tracing::{debug, info, warn};

/// Disassembles regvm bytecode into readable assembly instructions
///
/// Each line holds the address of an instruction, its mnemonic, and its operands. Opcode bytes
/// outside the instruction set are listed as `unknown`.
///
/// # Arguments
///
/// * `args` - Arguments specifying the target and disassembly options
///
/// # Returns
///
/// A string containing the disassembled bytecode in assembly format
pub fn disassemble(args: DisassemblerArgs) -> Result<String, Error> {
    let start_time = Instant::now();

    // get the bytecode from the target
    let start_fetch_time = Instant::now();
    let bytecode =
        args.get_bytecode().map_err(|e| eyre!("fetching target bytecode failed: {}", e))?;
    debug!("fetching target bytecode took {:?}", start_fetch_time.elapsed());

    let asm = disassemble_bytes(&bytecode, args.decimal_counter);

    info!("disassembled {} bytes successfully", bytecode.len());
    debug!("disassembly took {:?}", start_time.elapsed());
    Ok(asm)
}

/// Disassembles `bytecode`, one instruction per line.
///
/// ```
/// use regvm_disassembler::disassemble_bytes;
///
/// let asm = disassemble_bytes(&[0x01, 0x00, 0x05, 0x0f, 0x00, 0x0e], false);
/// assert_eq!(asm, "000000 LOAD_CONST r0, 5\n000003 PRINT r0\n000005 HALT\n");
/// ```
pub fn disassemble_bytes(bytecode: &[u8], decimal_counter: bool) -> String {
    let mut program_counter = 0;
    let mut asm = String::new();

    // iterate over the bytecode, disassembling each instruction
    while program_counter < bytecode.len() {
        let info = OpCodeInfo::from(bytecode[program_counter]);
        let offset = if decimal_counter {
            program_counter.to_string()
        } else {
            format!("{:06x}", program_counter)
        };

        match Instruction::decode_slice(&bytecode[program_counter..]) {
            Some(instruction) => asm.push_str(&format!("{} {}\n", offset, instruction)),

            // the bytecode ends before this instruction's operands do
            None => {
                warn!("truncated {} at offset {}", info.name(), offset);
                let operands = bytecode[program_counter + 1..]
                    .iter()
                    .map(|operand| format!(" {:#04x}", operand))
                    .collect::<String>();
                asm.push_str(&format!("{} {}{}\n", offset, info.name(), operands));
            }
        }

        program_counter += info.width() as usize;
    }

    asm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DisassemblerArgsBuilder;

    #[test]
    fn test_disassemble_subroutine_program() {
        let asm = disassemble_bytes(
            &[
                0x01, 0x00, 0x05, 0x0c, 0x08, 0x0f, 0x00, 0x0e, 0x01, 0x01, 0x02, 0x05, 0x00, 0x00,
                0x01, 0x0d,
            ],
            false,
        );

        assert_eq!(
            asm.lines().collect::<Vec<_>>(),
            vec![
                "000000 LOAD_CONST r0, 5",
                "000003 CALL 0x08",
                "000005 PRINT r0",
                "000007 HALT",
                "000008 LOAD_CONST r1, 2",
                "00000b MUL r0, r0, r1",
                "00000f RETURN",
            ]
        );
    }

    #[test]
    fn test_disassemble_decimal_counter() {
        let asm = disassemble_bytes(&[0x09, 0x06, 0x0a, 0x00, 0x0f, 0x0e], true);
        assert_eq!(asm, "0 JUMP 0x06\n2 JUMP_IF_ZERO r0, 0x0f\n5 HALT\n");
    }

    #[test]
    fn test_disassemble_unknown_opcode() {
        let asm = disassemble_bytes(&[0x00, 0xff, 0x0e], false);
        assert_eq!(asm, "000000 unknown 0x00\n000001 unknown 0xff\n000002 HALT\n");
    }

    #[test]
    fn test_disassemble_truncated_instruction() {
        let asm = disassemble_bytes(&[0x0e, 0x03, 0x02, 0x00], false);
        assert_eq!(asm, "000000 HALT\n000001 ADD 0x02 0x00\n");

        let asm = disassemble_bytes(&[0x09], false);
        assert_eq!(asm, "000000 JUMP\n");
    }

    #[test]
    fn test_disassemble_empty() {
        assert_eq!(disassemble_bytes(&[], false), "");
    }

    #[test]
    fn test_disassemble_from_args() {
        let args = DisassemblerArgsBuilder::new()
            .target("0x0100050F000E".to_string())
            .build()
            .expect("failed to build args");

        let asm = disassemble(args).expect("failed to disassemble");
        assert_eq!(asm, "000000 LOAD_CONST r0, 5\n000003 PRINT r0\n000005 HALT\n");
    }

    #[test]
    fn test_disassemble_bad_target() {
        let args = DisassemblerArgsBuilder::new()
            .target("0x0e0".to_string())
            .build()
            .expect("failed to build args");

        assert!(disassemble(args).is_err());
    }
}
