//! Sparse opcode table covering the full byte range.

use super::Handler;

pub(crate) struct OpcodeTable {
    entries: [Option<Handler>; 256],
}

impl OpcodeTable {
    pub(crate) fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| None),
        }
    }

    /// Shared handle on the handler bound to `opcode`. Dispatch holds this
    /// clone while the handler runs, so the handler may rebind its own entry.
    #[inline]
    pub(crate) fn get(&self, opcode: u8) -> Option<Handler> {
        self.entries[opcode as usize].clone()
    }

    pub(crate) fn insert(&mut self, opcode: u8, handler: Handler) -> Option<Handler> {
        self.entries[opcode as usize].replace(handler)
    }

    pub(crate) fn remove(&mut self, opcode: u8) -> Option<Handler> {
        self.entries[opcode as usize].take()
    }

    pub(crate) fn contains(&self, opcode: u8) -> bool {
        self.entries[opcode as usize].is_some()
    }

    /// Bound opcodes in ascending order.
    pub(crate) fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_some())
            .map(|(opcode, _)| opcode as u8)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }
}
