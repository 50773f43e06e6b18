//! Operand descriptors.
//!
//! A descriptor is a type, not a value: it tells an instruction body how to
//! fetch or store one of its arguments. [`Reg<R>`] addresses register `R`
//! directly. [`Mem<R>`] addresses the memory cell whose address is held in
//! register `R`; when `R` is the program counter the access also advances it by
//! one, which is how immediate operands are consumed. Because of that side
//! effect the order in which an instruction touches its operands is observable.

use std::marker::PhantomData;

use crate::registers::{names, Register, RegisterName};
use crate::vm::Vm;

/// Read/write access to one instruction argument.
pub trait Operand {
    fn read(vm: &mut Vm) -> u8;
    fn write(vm: &mut Vm, value: u8);
}

/// Register-direct operand.
pub struct Reg<R: RegisterName>(PhantomData<R>);

/// Register-indirect memory operand.
pub struct Mem<R: RegisterName>(PhantomData<R>);

/// Immediate operand: the next program byte.
pub type Imm = Mem<names::ProgramCounter>;

impl<R: RegisterName> Operand for Reg<R> {
    #[inline]
    fn read(vm: &mut Vm) -> u8 {
        vm.get(R::REGISTER)
    }

    #[inline]
    fn write(vm: &mut Vm, value: u8) {
        vm.set(R::REGISTER, value);
    }
}

impl<R: RegisterName> Mem<R> {
    /// Address of the cell, advancing the program counter past it if `R` is
    /// the program counter.
    #[inline]
    fn address(vm: &mut Vm) -> u8 {
        let address = vm.get(R::REGISTER);
        if R::REGISTER == Register::ProgramCounter {
            vm.set(Register::ProgramCounter, address.wrapping_add(1));
        }
        address
    }
}

impl<R: RegisterName> Operand for Mem<R> {
    #[inline]
    fn read(vm: &mut Vm) -> u8 {
        let address = Self::address(vm);
        vm.read_memory(address)
    }

    #[inline]
    fn write(vm: &mut Vm, value: u8) {
        let address = Self::address(vm);
        vm.write_memory(address, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::names::{GeneralA, GeneralB, ProgramCounter, StackPointer};

    #[test]
    fn test_reg_reads_and_writes_register() {
        let mut vm = Vm::new();
        Reg::<GeneralB>::write(&mut vm, 0x33);
        assert_eq!(vm.get(Register::GeneralB), 0x33);
        assert_eq!(Reg::<GeneralB>::read(&mut vm), 0x33);
        assert_eq!(Reg::<GeneralA>::read(&mut vm), 0);
    }

    #[test]
    fn test_immediate_reads_advance_program_counter() {
        let mut vm = Vm::with_program(&[0x10, 0x20, 0x30]).unwrap();
        assert_eq!(Imm::read(&mut vm), 0x10);
        assert_eq!(Imm::read(&mut vm), 0x20);
        assert_eq!(vm.get(Register::ProgramCounter), 2);
        assert_eq!(Reg::<ProgramCounter>::read(&mut vm), 2);
    }

    #[test]
    fn test_immediate_write_advances_program_counter() {
        let mut vm = Vm::with_program(&[0, 0, 0]).unwrap();
        vm.set(Register::ProgramCounter, 1);
        Imm::write(&mut vm, 0x99);
        assert_eq!(vm.program(), &[0, 0x99, 0]);
        assert_eq!(vm.get(Register::ProgramCounter), 2);
    }

    #[test]
    fn test_indirect_through_other_register_does_not_move_it() {
        let mut vm = Vm::new();
        vm.set(Register::StackPointer, 0xF0);
        Mem::<StackPointer>::write(&mut vm, 0x5A);
        assert_eq!(vm.read_memory(0xF0), 0x5A);
        assert_eq!(Mem::<StackPointer>::read(&mut vm), 0x5A);
        assert_eq!(vm.get(Register::StackPointer), 0xF0);
    }

    #[test]
    fn test_program_counter_wraps() {
        let mut vm = Vm::new();
        vm.set(Register::ProgramCounter, 0xFF);
        vm.write_memory(0xFF, 7);
        assert_eq!(Imm::read(&mut vm), 7);
        assert_eq!(vm.get(Register::ProgramCounter), 0);
    }
}
