//! Data movement and byte arithmetic.

use crate::operand::Operand;
use crate::registers::Register;
use crate::vm::Vm;

/// `Dst := Src`.
pub fn copy<Src: Operand, Dst: Operand>(vm: &mut Vm) {
    let value = Src::read(vm);
    Dst::write(vm, value);
}

/// `Dst := Src1 + Src2`, wrapping. The sum is also latched into `result`.
pub fn add<Src1: Operand, Src2: Operand, Dst: Operand>(vm: &mut Vm) {
    binary::<Src1, Src2, Dst>(vm, u8::wrapping_add);
}

/// `Dst := Src1 - Src2`, wrapping. The difference is also latched into `result`.
pub fn sub<Src1: Operand, Src2: Operand, Dst: Operand>(vm: &mut Vm) {
    binary::<Src1, Src2, Dst>(vm, u8::wrapping_sub);
}

#[inline]
fn binary<Src1: Operand, Src2: Operand, Dst: Operand>(vm: &mut Vm, op: fn(u8, u8) -> u8) {
    let lhs = Src1::read(vm);
    let rhs = Src2::read(vm);
    let value = op(lhs, rhs);
    Dst::write(vm, value);
    vm.set(Register::Result, value);
}
