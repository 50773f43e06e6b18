//! The flat byte store shared by code and both stacks.
//!
//! Addresses are register values, so the store spans exactly the 256 cells a
//! byte can address and every access is in range by construction. The program
//! is copied in at address zero; the cells past it start zeroed and are where
//! the stacks grow into (downward from address 255).

use crate::vm::VmError;

/// Number of addressable cells.
pub const ADDRESS_SPACE: usize = 256;

/// Longest accepted program. A full 256-byte program would leave the program
/// counter no value at which it has run past the end.
pub const MAX_PROGRAM_LEN: usize = ADDRESS_SPACE - 1;

#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; ADDRESS_SPACE],
    program_len: usize,
}

impl Memory {
    /// A store with no program.
    pub fn empty() -> Self {
        Self {
            cells: [0; ADDRESS_SPACE],
            program_len: 0,
        }
    }

    /// Copy `program` in at address zero.
    pub fn with_program(program: &[u8]) -> Result<Self, VmError> {
        if program.len() > MAX_PROGRAM_LEN {
            return Err(VmError::ProgramTooLarge {
                len: program.len(),
                max: MAX_PROGRAM_LEN,
            });
        }
        let mut memory = Self::empty();
        memory.cells[..program.len()].copy_from_slice(program);
        memory.program_len = program.len();
        Ok(memory)
    }

    #[inline]
    pub fn read(&self, address: u8) -> u8 {
        self.cells[address as usize]
    }

    #[inline]
    pub fn write(&mut self, address: u8, value: u8) {
        self.cells[address as usize] = value;
    }

    /// Length of the program loaded at construction.
    pub fn program_len(&self) -> usize {
        self.program_len
    }

    /// Whether `address` lies at or past the end of the program.
    #[inline]
    pub fn is_past_program(&self, address: u8) -> bool {
        address as usize >= self.program_len
    }

    /// The program region as it currently stands, including any writes into it.
    pub fn program(&self) -> &[u8] {
        &self.cells[..self.program_len]
    }

    /// All 256 cells.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("program_len", &self.program_len)
            .field("program", &self.program())
            .finish_non_exhaustive()
    }
}
