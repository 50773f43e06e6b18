//! Standard instruction library.
//!
//! Every instruction is a generic function over operand descriptors, so one
//! body serves every addressing combination:
//!
//! ```
//! use bytevm::operand::{Imm, Reg};
//! use bytevm::registers::names::{GeneralA, GeneralB};
//! use bytevm::{ops, Vm};
//!
//! let mut vm = Vm::new();
//! vm.register_opcode(0x10, ops::copy::<Imm, Reg<GeneralA>>);
//! vm.register_opcode(0x11, ops::copy::<Reg<GeneralA>, Reg<GeneralB>>);
//! vm.register_opcode(0x20, ops::add::<Reg<GeneralA>, Imm, Reg<GeneralA>>);
//! vm.register_opcode(0x40, ops::jump_if_not_zero::<Imm>);
//! ```
//!
//! Sources come first and the destination last. Operands are read strictly
//! left to right and the destination is written after every source has been
//! read, which fixes how far immediate operands move the program counter.
//! Conditional control flow always fetches its target, taken or not.

mod arith;
mod control;
mod stack;
mod syscall;

pub use arith::{add, copy, sub};
pub use control::{
    call, call_if, call_if_less_than_zero, call_if_not_zero, call_if_zero, call_return,
    call_return_if, call_return_if_less_than_zero, call_return_if_not_zero, call_return_if_zero,
    jump, jump_if, jump_if_less_than_zero, jump_if_not_zero, jump_if_zero,
};
pub use stack::{pop, push};
pub use syscall::syscall;

use crate::registers::Register;
use crate::vm::Vm;

/// Predicate over the `result` register, which holds the value produced by the
/// most recent `add` or `sub`.
pub trait Condition {
    fn holds(result: u8) -> bool;

    fn check(vm: &Vm) -> bool {
        Self::holds(vm.get(Register::Result))
    }
}

pub enum Always {}
pub enum Zero {}
pub enum NotZero {}
/// The result read as a two's-complement byte is negative.
pub enum LessThanZero {}

impl Condition for Always {
    fn holds(_result: u8) -> bool {
        true
    }
}

impl Condition for Zero {
    fn holds(result: u8) -> bool {
        result == 0
    }
}

impl Condition for NotZero {
    fn holds(result: u8) -> bool {
        result != 0
    }
}

impl Condition for LessThanZero {
    fn holds(result: u8) -> bool {
        (result as i8) < 0
    }
}

/// Does nothing beyond the opcode fetch dispatch already performed.
pub fn nop(_vm: &mut Vm) {}
