use crate::error::VmError;

use super::super::core::VM;

/// LOAD_CONST - Load an immediate value into a register
pub fn load_const(vm: &mut VM, reg: u8, value: u8) -> Result<(), VmError> {
    vm.registers.set(reg, value)
}

/// MOVE - Copy one register into another
pub fn mov(vm: &mut VM, dest: u8, src: u8) -> Result<(), VmError> {
    let value = vm.registers.get(src)?;
    vm.registers.set(dest, value)
}

/// LOAD_MEM - Load a memory cell into a register
pub fn load_mem(vm: &mut VM, reg: u8, addr: u8) -> Result<(), VmError> {
    let value = vm.memory.read(addr);
    vm.registers.set(reg, value)
}

/// STORE_MEM - Store a register into a memory cell
pub fn store_mem(vm: &mut VM, addr: u8, reg: u8) -> Result<(), VmError> {
    let value = vm.registers.get(reg)?;
    vm.memory.write(addr, value);
    Ok(())
}
