use crate::error::VmError;

use super::super::core::VM;

/// Reads both source registers, combines them with `op`, and writes the destination register.
fn binary_op(
    vm: &mut VM,
    dest: u8,
    src1: u8,
    src2: u8,
    op: impl FnOnce(u8, u8) -> Result<u8, VmError>,
) -> Result<(), VmError> {
    let a = vm.registers.get(src1)?;
    let b = vm.registers.get(src2)?;
    let result = op(a, b)?;
    vm.registers.set(dest, result)
}

/// ADD - Addition modulo 256
pub fn add(vm: &mut VM, dest: u8, src1: u8, src2: u8) -> Result<(), VmError> {
    binary_op(vm, dest, src1, src2, |a, b| Ok(a.wrapping_add(b)))
}

/// SUB - Subtraction modulo 256
pub fn sub(vm: &mut VM, dest: u8, src1: u8, src2: u8) -> Result<(), VmError> {
    binary_op(vm, dest, src1, src2, |a, b| Ok(a.wrapping_sub(b)))
}

/// MUL - Multiplication modulo 256
pub fn mul(vm: &mut VM, dest: u8, src1: u8, src2: u8) -> Result<(), VmError> {
    binary_op(vm, dest, src1, src2, |a, b| Ok(a.wrapping_mul(b)))
}

/// DIV - Integer division, rounding toward zero. A zero divisor stops the program and leaves the
/// destination register untouched.
pub fn div(vm: &mut VM, dest: u8, src1: u8, src2: u8) -> Result<(), VmError> {
    binary_op(vm, dest, src1, src2, |a, b| a.checked_div(b).ok_or(VmError::DivisionByZero))
}
