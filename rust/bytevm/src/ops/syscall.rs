use crate::operand::Operand;
use crate::vm::Vm;

/// Fetch two operands and hand them to [`Vm::syscall`]. What the call does is
/// up to the installed hook; by default the second operand is emitted.
pub fn syscall<Arg1: Operand, Arg2: Operand>(vm: &mut Vm) {
    let first = Arg1::read(vm);
    let second = Arg2::read(vm);
    vm.syscall(first, second);
}
