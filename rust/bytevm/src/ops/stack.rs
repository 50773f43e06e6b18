//! Data stack instructions and the push/pop primitive shared with calls.
//!
//! Stacks grow downward: push pre-decrements its pointer and then writes, pop
//! reads and then post-increments, so a pointer starting at zero puts the first
//! value at address 255.

use crate::operand::Operand;
use crate::registers::{names, RegisterName};
use crate::vm::Vm;

/// Push `Src` onto the data stack.
///
/// The data stack and the call stack both start with their pointer at zero and
/// so share the top of memory. A program that keeps values on the data stack
/// across a call must first move one of the two pointers elsewhere.
pub fn push<Src: Operand>(vm: &mut Vm) {
    let value = Src::read(vm);
    push_onto::<names::StackPointer>(vm, value);
}

/// Pop the data stack into `Dst`.
pub fn pop<Dst: Operand>(vm: &mut Vm) {
    let value = pop_from::<names::StackPointer>(vm);
    Dst::write(vm, value);
}

pub(crate) fn push_onto<P: RegisterName>(vm: &mut Vm, value: u8) {
    let top = vm.get(P::REGISTER).wrapping_sub(1);
    vm.set(P::REGISTER, top);
    vm.write_memory(top, value);
}

pub(crate) fn pop_from<P: RegisterName>(vm: &mut Vm) -> u8 {
    let top = vm.get(P::REGISTER);
    let value = vm.read_memory(top);
    vm.set(P::REGISTER, top.wrapping_add(1));
    value
}
