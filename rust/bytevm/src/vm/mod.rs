//! The machine: register file, memory, opcode table and the dispatch loop.

mod table;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::VmConfig;
use crate::memory::Memory;
use crate::registers::{Register, RegisterFile};
use table::OpcodeTable;

/// Behaviour bound to an opcode. Receives the machine after the opcode byte has
/// been consumed and performs its own operand fetches and stores.
pub type Handler = Arc<dyn Fn(&mut Vm) + Send + Sync>;

/// Replacement for the default syscall; receives both syscall operands.
pub type SyscallHook = Arc<dyn Fn(&mut Vm, u8, u8) + Send + Sync>;

/// Observer attached with [`Vm::set_debug_callback`].
pub type DebugCallback = Option<Box<dyn FnMut(&DebugEvent) + Send>>;

/// Events emitted by the dispatch loop to an attached debug callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugEvent {
    /// About to run the handler for `opcode`, read from `address`.
    Step { address: u8, opcode: u8 },
    /// The program counter is at or past the end of the program.
    Halt { address: u8 },
    /// No handler is bound to the byte at `address`.
    UnknownOpcode { address: u8, opcode: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("unknown opcode 0x{opcode:02x} at address {address}")]
    UnknownOpcode { opcode: u8, address: u8 },
    #[error("program of {len} bytes exceeds the {max} byte limit")]
    ProgramTooLarge { len: usize, max: usize },
    #[error("instruction limit exceeded: {0}")]
    InstructionLimitExceeded(u64),
}

impl VmError {
    pub fn is_unknown_opcode(&self) -> bool {
        matches!(self, VmError::UnknownOpcode { .. })
    }

    pub fn is_instruction_limit_exceeded(&self) -> bool {
        matches!(self, VmError::InstructionLimitExceeded(_))
    }
}

/// Outcome of a single [`Vm::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One instruction ran; `address` is where its opcode byte was read.
    Executed { opcode: u8, address: u8 },
    /// The program counter was at or past the end of the program.
    Halted,
}

/// Why [`Vm::run`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    EndOfProgram,
    UnknownOpcode { opcode: u8, address: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed by this run.
    pub instructions: u64,
    pub halt: HaltReason,
}

/// The byte register VM.
///
/// Single-threaded and non-reentrant: handlers run inline inside [`Vm::tick`]
/// and any change they make to the opcode table is seen by the next dispatch.
/// Each instance owns all of its state, so separate instances may run on
/// separate threads.
pub struct Vm {
    registers: RegisterFile,
    memory: Memory,
    opcodes: OpcodeTable,
    config: VmConfig,
    syscall_hook: Option<SyscallHook>,
    /// Bytes emitted by the default syscall.
    output: Vec<u8>,
    debug_callback: DebugCallback,
    instruction_count: u64,
}

impl Vm {
    /// An empty machine: no program, zeroed registers, no opcodes.
    pub fn new() -> Self {
        Self::from_memory(Memory::empty(), VmConfig::default())
    }

    /// A machine over `program`, which is copied in at address zero.
    pub fn with_program(program: &[u8]) -> Result<Self, VmError> {
        Self::with_config(program, VmConfig::default())
    }

    pub fn with_config(program: &[u8], config: VmConfig) -> Result<Self, VmError> {
        Ok(Self::from_memory(Memory::with_program(program)?, config))
    }

    fn from_memory(memory: Memory, config: VmConfig) -> Self {
        Self {
            registers: RegisterFile::new(),
            memory,
            opcodes: OpcodeTable::new(),
            config,
            syscall_hook: None,
            output: Vec::new(),
            debug_callback: None,
            instruction_count: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Opcode table
    // -----------------------------------------------------------------------

    /// Bind `handler` to `opcode`, returning whatever was bound before.
    ///
    /// Safe to call from inside a running handler, including for the opcode
    /// currently executing; the new binding takes effect on the next dispatch.
    pub fn register_opcode<F>(&mut self, opcode: u8, handler: F) -> Option<Handler>
    where
        F: Fn(&mut Vm) + Send + Sync + 'static,
    {
        self.register_handler(opcode, Arc::new(handler))
    }

    /// Bind an already shared handler to `opcode`.
    pub fn register_handler(&mut self, opcode: u8, handler: Handler) -> Option<Handler> {
        trace!(opcode, "register opcode");
        self.opcodes.insert(opcode, handler)
    }

    pub fn unregister_opcode(&mut self, opcode: u8) -> Option<Handler> {
        self.opcodes.remove(opcode)
    }

    pub fn is_registered(&self, opcode: u8) -> bool {
        self.opcodes.contains(opcode)
    }

    /// Bound opcode values in ascending order.
    pub fn registered_opcodes(&self) -> Vec<u8> {
        self.opcodes.opcodes().collect()
    }

    // -----------------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------------

    /// Execute one instruction. Returns `false` once the program counter has
    /// run past the program or when the next opcode has no handler.
    pub fn tick(&mut self) -> bool {
        match self.step() {
            Ok(Step::Executed { .. }) => true,
            Ok(Step::Halted) => false,
            Err(err) => {
                warn!(%err, "halting");
                false
            }
        }
    }

    /// Execute one instruction, distinguishing a clean halt from an
    /// unregistered opcode.
    ///
    /// An unregistered opcode changes nothing: the program counter stays on the
    /// offending byte, so binding it and stepping again resumes the program.
    pub fn step(&mut self) -> Result<Step, VmError> {
        let address = self.registers.get(Register::ProgramCounter);
        if self.memory.is_past_program(address) {
            debug!(address, "halt");
            self.emit_debug_event(DebugEvent::Halt { address });
            return Ok(Step::Halted);
        }

        let opcode = self.memory.read(address);
        let Some(handler) = self.opcodes.get(opcode) else {
            self.emit_debug_event(DebugEvent::UnknownOpcode { address, opcode });
            return Err(VmError::UnknownOpcode { opcode, address });
        };

        self.emit_debug_event(DebugEvent::Step { address, opcode });
        trace!(address, opcode, "dispatch");
        self.registers
            .set(Register::ProgramCounter, address.wrapping_add(1));
        handler(self);
        self.instruction_count = self.instruction_count.saturating_add(1);
        Ok(Step::Executed { opcode, address })
    }

    /// Step until the program halts, bounded by `max_instructions`.
    ///
    /// The limit only trips when another instruction would actually run, so a
    /// program that stops after exactly `max_instructions` steps succeeds.
    pub fn run(&mut self) -> Result<RunSummary, VmError> {
        let limit = self.config.max_instructions;
        let mut instructions = 0u64;
        loop {
            if instructions >= limit && self.will_execute() {
                return Err(VmError::InstructionLimitExceeded(limit));
            }
            match self.step() {
                Ok(Step::Executed { .. }) => instructions += 1,
                Ok(Step::Halted) => {
                    debug!(instructions, "program finished");
                    return Ok(RunSummary {
                        instructions,
                        halt: HaltReason::EndOfProgram,
                    });
                }
                Err(VmError::UnknownOpcode { opcode, address }) if !self.config.strict_opcodes => {
                    warn!(opcode, address, instructions, "run stopped on unknown opcode");
                    return Ok(RunSummary {
                        instructions,
                        halt: HaltReason::UnknownOpcode { opcode, address },
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Whether the program counter is at or past the end of the program.
    pub fn is_halted(&self) -> bool {
        self.memory
            .is_past_program(self.registers.get(Register::ProgramCounter))
    }

    /// Whether the next [`Vm::step`] would run a handler.
    fn will_execute(&self) -> bool {
        let address = self.registers.get(Register::ProgramCounter);
        !self.memory.is_past_program(address) && self.opcodes.contains(self.memory.read(address))
    }

    /// Zero every register, program counter included. The program, the rest of
    /// memory, the opcode table and the output buffer are left as they are.
    pub fn reset(&mut self) {
        debug!(executed = self.instruction_count, "reset");
        self.registers.clear();
        self.instruction_count = 0;
    }

    /// Instructions executed since construction or the last [`Vm::reset`].
    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    // -----------------------------------------------------------------------
    // State access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn get(&self, register: Register) -> u8 {
        self.registers.get(register)
    }

    #[inline]
    pub fn set(&mut self, register: Register, value: u8) {
        self.registers.set(register, value);
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    #[inline]
    pub fn read_memory(&self, address: u8) -> u8 {
        self.memory.read(address)
    }

    #[inline]
    pub fn write_memory(&mut self, address: u8, value: u8) {
        self.memory.write(address, value);
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The program region, including any writes handlers made into it.
    pub fn program(&self) -> &[u8] {
        self.memory.program()
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Syscalls and output
    // -----------------------------------------------------------------------

    /// Replace the default syscall behaviour.
    pub fn set_syscall_hook<F>(&mut self, hook: F)
    where
        F: Fn(&mut Vm, u8, u8) + Send + Sync + 'static,
    {
        self.syscall_hook = Some(Arc::new(hook));
    }

    pub fn clear_syscall_hook(&mut self) {
        self.syscall_hook = None;
    }

    /// Perform a syscall with already fetched operands.
    ///
    /// Without a hook, the second operand is emitted to the output buffer and
    /// the first is only logged as the channel.
    pub fn syscall(&mut self, first: u8, second: u8) {
        match self.syscall_hook.clone() {
            Some(hook) => hook(self, first, second),
            None => self.emit(first, second),
        }
    }

    fn emit(&mut self, channel: u8, byte: u8) {
        if self.output.len() >= self.config.output_limit {
            warn!(
                channel,
                byte,
                limit = self.config.output_limit,
                "output buffer full, dropping byte"
            );
            return;
        }
        debug!(channel, byte, "emit");
        self.output.push(byte);
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    // -----------------------------------------------------------------------
    // Debugging
    // -----------------------------------------------------------------------

    pub fn set_debug_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&DebugEvent) + Send + 'static,
    {
        self.debug_callback = Some(Box::new(callback));
    }

    pub fn clear_debug_callback(&mut self) {
        self.debug_callback = None;
    }

    fn emit_debug_event(&mut self, event: DebugEvent) {
        if let Some(ref mut cb) = self.debug_callback {
            cb(&event);
        }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("registers", &self.registers)
            .field("memory", &self.memory)
            .field("opcodes", &self.opcodes.len())
            .field("instruction_count", &self.instruction_count)
            .finish_non_exhaustive()
    }
}
