use crate::error::VmError;

use super::super::core::VM;

/// PRINT - Append the register's value, in decimal, to the output
pub fn print(vm: &mut VM, reg: u8) -> Result<(), VmError> {
    let value = vm.registers.get(reg)?;
    vm.output.push_str(&value.to_string());
    Ok(())
}
