//! Programs and machine setup shared by the bytevm benchmarks.

use bytevm::operand::{Imm, Reg};
use bytevm::registers::names::GeneralA;
use bytevm::{ops, Vm};

pub const ADD_IMM_IMM_A: u8 = 0x20;
pub const SUB_A_IMM_A: u8 = 0x23;
pub const PUSH_A: u8 = 0x31;
pub const POP_A: u8 = 0x32;
pub const JUMP_IF_NOT_ZERO: u8 = 0x42;
pub const CALL_IF_NOT_ZERO: u8 = 0x52;
pub const RETURN_IF_ZERO: u8 = 0x61;
pub const JUMP: u8 = 0x40;

/// Count the accumulator down from `start` to zero. Runs `1 + 2 * start`
/// instructions.
pub fn countdown_program(start: u8) -> Vec<u8> {
    vec![
        ADD_IMM_IMM_A, start, 0, // 0
        SUB_A_IMM_A, 1, // 3
        JUMP_IF_NOT_ZERO, 3, // 5
    ]
}

/// Recurse `depth` calls deep on the call stack, then unwind. Runs
/// `3 * depth + 3` instructions; the call stack must not reach the program, so
/// `depth` stays below 244.
pub fn recursion_program(depth: u8) -> Vec<u8> {
    vec![
        ADD_IMM_IMM_A, depth, 0, // 0
        CALL_IF_NOT_ZERO, 7, // 3
        JUMP, 12, // 5: off the end
        SUB_A_IMM_A, 1, // 7
        CALL_IF_NOT_ZERO, 7, // 9
        RETURN_IF_ZERO, // 11
    ]
}

/// Interleave pushes and pops of the accumulator `pairs` times.
pub fn stack_churn_program(pairs: u8) -> Vec<u8> {
    vec![
        ADD_IMM_IMM_A, pairs, 0, // 0
        PUSH_A, // 3
        POP_A, // 4
        SUB_A_IMM_A, 1, // 5
        JUMP_IF_NOT_ZERO, 3, // 7
    ]
}

/// A machine over `program` with the opcodes above bound.
pub fn bench_vm(program: &[u8]) -> Result<Vm, bytevm::VmError> {
    let mut vm = Vm::with_program(program)?;
    vm.register_opcode(ADD_IMM_IMM_A, ops::add::<Imm, Imm, Reg<GeneralA>>);
    vm.register_opcode(SUB_A_IMM_A, ops::sub::<Reg<GeneralA>, Imm, Reg<GeneralA>>);
    vm.register_opcode(PUSH_A, ops::push::<Reg<GeneralA>>);
    vm.register_opcode(POP_A, ops::pop::<Reg<GeneralA>>);
    vm.register_opcode(JUMP, ops::jump::<Imm>);
    vm.register_opcode(JUMP_IF_NOT_ZERO, ops::jump_if_not_zero::<Imm>);
    vm.register_opcode(CALL_IF_NOT_ZERO, ops::call_if_not_zero::<Imm>);
    vm.register_opcode(RETURN_IF_ZERO, ops::call_return_if_zero);
    Ok(vm)
}
