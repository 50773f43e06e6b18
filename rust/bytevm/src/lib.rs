//! bytevm: a tiny register-based virtual machine over single-byte cells.
//!
//! The machine owns a fixed register file, a 256-byte store that holds both the
//! program and the two stacks, and a sparse opcode table mapping byte values to
//! handlers. The core defines no instruction set of its own: callers bind opcode
//! bytes to handlers, usually instantiations of the generic instructions in
//! [`ops`] over the operand descriptors in [`operand`], and then drive the
//! machine one instruction at a time with [`Vm::tick`].
//!
//! ```
//! use bytevm::operand::{Imm, Reg};
//! use bytevm::registers::{names::GeneralA, Register};
//! use bytevm::{ops, Vm};
//!
//! let mut vm = Vm::with_program(&[0x20, 34, 12]).unwrap();
//! vm.register_opcode(0x20, ops::add::<Imm, Imm, Reg<GeneralA>>);
//! while vm.tick() {}
//! assert_eq!(vm.get(Register::GeneralA), 46);
//! ```

pub mod config;
pub mod memory;
pub mod operand;
pub mod ops;
pub mod registers;
pub mod vm;

pub use config::{ConfigError, VmConfig};
pub use registers::Register;
pub use vm::{DebugEvent, Handler, HaltReason, RunSummary, Step, SyscallHook, Vm, VmError};
