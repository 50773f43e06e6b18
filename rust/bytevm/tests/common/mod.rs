//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use bytevm::operand::{Imm, Reg};
use bytevm::registers::names::{GeneralA, GeneralB};
use bytevm::{ops, Vm};

pub const NOP: u8 = 0x01;
pub const COPY_IMM_A: u8 = 0x10;
pub const COPY_A_B: u8 = 0x11;
pub const ADD_IMM_IMM_A: u8 = 0x20;
pub const SUB_IMM_IMM_A: u8 = 0x21;
pub const ADD_A_IMM_A: u8 = 0x22;
pub const SUB_A_IMM_A: u8 = 0x23;
pub const PUSH_IMM: u8 = 0x30;
pub const PUSH_A: u8 = 0x31;
pub const POP_A: u8 = 0x32;
pub const JUMP: u8 = 0x40;
pub const JUMP_IF_ZERO: u8 = 0x41;
pub const JUMP_IF_NOT_ZERO: u8 = 0x42;
pub const JUMP_IF_LESS_THAN_ZERO: u8 = 0x43;
pub const CALL: u8 = 0x50;
pub const CALL_IF_ZERO: u8 = 0x51;
pub const CALL_IF_NOT_ZERO: u8 = 0x52;
pub const CALL_IF_LESS_THAN_ZERO: u8 = 0x53;
pub const RETURN: u8 = 0x60;
pub const RETURN_IF_ZERO: u8 = 0x61;
pub const RETURN_IF_NOT_ZERO: u8 = 0x62;
pub const RETURN_IF_LESS_THAN_ZERO: u8 = 0x63;
pub const SYSCALL_IMM_IMM: u8 = 0x70;
pub const SYSCALL_IMM_A: u8 = 0x71;

/// Filler for bytes that must never be dispatched.
pub const UNREACHABLE: u8 = 0xFF;

/// Install a `tracing` subscriber honouring `RUST_LOG`; safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bytevm=warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Bind the opcode map above to the standard instruction library.
pub fn register_standard_opcodes(vm: &mut Vm) {
    vm.register_opcode(NOP, ops::nop);
    vm.register_opcode(COPY_IMM_A, ops::copy::<Imm, Reg<GeneralA>>);
    vm.register_opcode(COPY_A_B, ops::copy::<Reg<GeneralA>, Reg<GeneralB>>);
    vm.register_opcode(ADD_IMM_IMM_A, ops::add::<Imm, Imm, Reg<GeneralA>>);
    vm.register_opcode(SUB_IMM_IMM_A, ops::sub::<Imm, Imm, Reg<GeneralA>>);
    vm.register_opcode(ADD_A_IMM_A, ops::add::<Reg<GeneralA>, Imm, Reg<GeneralA>>);
    vm.register_opcode(SUB_A_IMM_A, ops::sub::<Reg<GeneralA>, Imm, Reg<GeneralA>>);
    vm.register_opcode(PUSH_IMM, ops::push::<Imm>);
    vm.register_opcode(PUSH_A, ops::push::<Reg<GeneralA>>);
    vm.register_opcode(POP_A, ops::pop::<Reg<GeneralA>>);
    vm.register_opcode(JUMP, ops::jump::<Imm>);
    vm.register_opcode(JUMP_IF_ZERO, ops::jump_if_zero::<Imm>);
    vm.register_opcode(JUMP_IF_NOT_ZERO, ops::jump_if_not_zero::<Imm>);
    vm.register_opcode(JUMP_IF_LESS_THAN_ZERO, ops::jump_if_less_than_zero::<Imm>);
    vm.register_opcode(CALL, ops::call::<Imm>);
    vm.register_opcode(CALL_IF_ZERO, ops::call_if_zero::<Imm>);
    vm.register_opcode(CALL_IF_NOT_ZERO, ops::call_if_not_zero::<Imm>);
    vm.register_opcode(CALL_IF_LESS_THAN_ZERO, ops::call_if_less_than_zero::<Imm>);
    vm.register_opcode(RETURN, ops::call_return);
    vm.register_opcode(RETURN_IF_ZERO, ops::call_return_if_zero);
    vm.register_opcode(RETURN_IF_NOT_ZERO, ops::call_return_if_not_zero);
    vm.register_opcode(RETURN_IF_LESS_THAN_ZERO, ops::call_return_if_less_than_zero);
    vm.register_opcode(SYSCALL_IMM_IMM, ops::syscall::<Imm, Imm>);
    vm.register_opcode(SYSCALL_IMM_A, ops::syscall::<Imm, Reg<GeneralA>>);
}

/// Build a VM over `program` with the standard opcodes bound.
pub fn standard_vm(program: &[u8]) -> Vm {
    init_tracing();
    let mut vm = Vm::with_program(program).expect("program should fit");
    register_standard_opcodes(&mut vm);
    vm
}

/// Tick until halt, returning how many instructions ran.
pub fn tick_to_end(vm: &mut Vm) -> usize {
    let mut ticks = 0;
    while vm.tick() {
        ticks += 1;
    }
    ticks
}
