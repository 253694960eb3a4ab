use tracing::debug;

use crate::{
    core::{constants::SIGN_BIT, vm::State},
    error::VmError,
};

use super::super::core::VM;

/// JUMP - Set the program counter
pub fn jump(vm: &mut VM, addr: u8) -> Result<(), VmError> {
    vm.pc = addr;
    Ok(())
}

/// JUMP_IF_ZERO - Set the program counter if the register holds zero
pub fn jump_if_zero(vm: &mut VM, reg: u8, addr: u8) -> Result<(), VmError> {
    if vm.registers.get(reg)? == 0 {
        vm.pc = addr;
    }
    Ok(())
}

/// JUMP_IF_NEG - Set the program counter if the register's sign bit (bit 7) is set
pub fn jump_if_neg(vm: &mut VM, reg: u8, addr: u8) -> Result<(), VmError> {
    if vm.registers.get(reg)? & SIGN_BIT != 0 {
        vm.pc = addr;
    }
    Ok(())
}

/// CALL - Push the return address and jump to the subroutine
pub fn call(vm: &mut VM, addr: u8) -> Result<(), VmError> {
    vm.call_stack.push(vm.pc);
    vm.pc = addr;
    Ok(())
}

/// RETURN - Pop the return address into the program counter. With an empty call stack this is a
/// no-op and execution falls through to the next instruction.
pub fn op_return(vm: &mut VM) -> Result<(), VmError> {
    match vm.call_stack.pop() {
        Some(addr) => vm.pc = addr,
        None => debug!(pc = vm.pc, "RETURN with an empty call stack"),
    }
    Ok(())
}

/// HALT - Stop execution successfully
pub fn halt(vm: &mut VM) -> Result<(), VmError> {
    vm.state = State::HaltedOk;
    Ok(())
}
