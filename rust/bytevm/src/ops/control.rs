//! Jumps, calls and returns.
//!
//! Conditional forms test the `result` register (see [`Condition`]). The target
//! operand is fetched before the condition is looked at, so a branch that is
//! not taken still steps over its immediate byte.

use super::stack::{pop_from, push_onto};
use super::{Always, Condition, LessThanZero, NotZero, Zero};
use crate::operand::Operand;
use crate::registers::{names, Register};
use crate::vm::Vm;

pub fn jump_if<C: Condition, Target: Operand>(vm: &mut Vm) {
    let target = Target::read(vm);
    if C::check(vm) {
        vm.set(Register::ProgramCounter, target);
    }
}

/// Push the return address (the program counter after the target fetch) onto
/// the call stack and continue at the target.
///
/// With both stack pointers at their zeroed defaults the return address lands
/// on the same cells as the data stack; relocate `call_stack_pointer` (or
/// `stack_pointer`) before mixing calls with pushes.
pub fn call_if<C: Condition, Target: Operand>(vm: &mut Vm) {
    let target = Target::read(vm);
    vm.set(Register::Scratch, target);
    if C::check(vm) {
        let return_address = vm.get(Register::ProgramCounter);
        push_onto::<names::CallStackPointer>(vm, return_address);
        let target = vm.get(Register::Scratch);
        vm.set(Register::ProgramCounter, target);
    }
}

pub fn call_return_if<C: Condition>(vm: &mut Vm) {
    if C::check(vm) {
        let return_address = pop_from::<names::CallStackPointer>(vm);
        vm.set(Register::ProgramCounter, return_address);
    }
}

pub fn jump<Target: Operand>(vm: &mut Vm) {
    jump_if::<Always, Target>(vm);
}

pub fn jump_if_zero<Target: Operand>(vm: &mut Vm) {
    jump_if::<Zero, Target>(vm);
}

pub fn jump_if_not_zero<Target: Operand>(vm: &mut Vm) {
    jump_if::<NotZero, Target>(vm);
}

pub fn jump_if_less_than_zero<Target: Operand>(vm: &mut Vm) {
    jump_if::<LessThanZero, Target>(vm);
}

pub fn call<Target: Operand>(vm: &mut Vm) {
    call_if::<Always, Target>(vm);
}

pub fn call_if_zero<Target: Operand>(vm: &mut Vm) {
    call_if::<Zero, Target>(vm);
}

pub fn call_if_not_zero<Target: Operand>(vm: &mut Vm) {
    call_if::<NotZero, Target>(vm);
}

pub fn call_if_less_than_zero<Target: Operand>(vm: &mut Vm) {
    call_if::<LessThanZero, Target>(vm);
}

pub fn call_return(vm: &mut Vm) {
    call_return_if::<Always>(vm);
}

pub fn call_return_if_zero(vm: &mut Vm) {
    call_return_if::<Zero>(vm);
}

pub fn call_return_if_not_zero(vm: &mut Vm) {
    call_return_if::<NotZero>(vm);
}

pub fn call_return_if_less_than_zero(vm: &mut Vm) {
    call_return_if::<LessThanZero>(vm);
}
