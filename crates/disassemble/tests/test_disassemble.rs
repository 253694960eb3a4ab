//! Integration tests for disassemble functionality.

#[cfg(test)]
mod integration_tests {
    use std::io::Write;

    use regvm_disassembler::{disassemble, DisassemblerArgs, DisassemblerArgsBuilder};

    #[test]
    fn test_disassemble_nominal() {
        let bytecode = "01000501010703000001030200010F000E";
        let expected = String::from("000000 LOAD_CONST r0, 5\n000003 LOAD_CONST r1, 7\n000006 ADD r0, r0, r1\n00000a ADD r2, r0, r1\n00000e PRINT r0\n000010 HALT\n");

        let assembly = disassemble(DisassemblerArgs {
            target: bytecode.to_owned(),
            decimal_counter: false,
            name: String::from(""),
            output: String::from(""),
        })
        .expect("failed to disassemble");

        assert_eq!(expected, assembly);
    }

    #[test]
    fn test_disassemble_decimal_counter_nominal() {
        let bytecode = "01000A010101040000010A000F09060F000E";
        let expected = String::from("0 LOAD_CONST r0, 10\n3 LOAD_CONST r1, 1\n6 SUB r0, r0, r1\n10 JUMP_IF_ZERO r0, 0x0f\n13 JUMP 0x06\n15 PRINT r0\n17 HALT\n");

        let assembly = disassemble(DisassemblerArgs {
            target: bytecode.to_owned(),
            decimal_counter: true,
            name: String::from(""),
            output: String::from(""),
        })
        .expect("failed to disassemble");

        assert_eq!(expected, assembly);
    }

    #[test]
    fn test_disassemble_with_custom_output() {
        let bytecode = "0100050C080F000E010102050000010D";
        let mut path = std::env::temp_dir();
        path.push("regvm_disassemble_test.hex");

        let mut file = std::fs::File::create(&path).expect("failed to create temp file");
        writeln!(file, "0x{}", bytecode).expect("failed to write temp file");

        let args = DisassemblerArgsBuilder::new()
            .target(path.to_string_lossy().into_owned())
            .build()
            .expect("failed to build args");
        let assembly = disassemble(args).expect("failed to disassemble");

        assert!(assembly.contains("000003 CALL 0x08\n"));
        assert!(assembly.ends_with("00000f RETURN\n"));

        std::fs::remove_file(&path).expect("failed to remove temp file");
    }
}
