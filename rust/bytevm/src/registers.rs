//! Register names and the fixed register file.
//!
//! Every register is one byte wide. The set is fixed at compile time and each
//! register exists twice: as a value of [`Register`] for runtime access, and as
//! an uninhabited marker type in [`names`] so operand descriptors can name a
//! register in their type.

/// Type-level handle on a register, implemented by every marker in [`names`].
pub trait RegisterName {
    const REGISTER: Register;
}

macro_rules! define_registers {
    (
        $(
            $(#[$doc:meta])*
            $variant:ident = $index:expr, $name:literal;
        )*
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Register {
            $(
                $(#[$doc])*
                $variant = $index,
            )*
        }

        impl Register {
            /// Every register, in index order.
            pub const ALL: [Register; [$($index),*].len()] = [$(Register::$variant),*];

            /// Number of registers in the file.
            pub const COUNT: usize = Self::ALL.len();

            /// The snake_case name used in logs and debug output.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Register::$variant => $name, )*
                }
            }
        }

        /// Marker types naming each register at the type level.
        pub mod names {
            $(
                $(#[$doc])*
                #[derive(Debug)]
                pub enum $variant {}

                impl super::RegisterName for $variant {
                    const REGISTER: super::Register = super::Register::$variant;
                }
            )*
        }
    };
}

define_registers! {
    /// General purpose register A; the usual accumulator.
    GeneralA = 0, "general_a";
    /// General purpose register B.
    GeneralB = 1, "general_b";
    /// General purpose register C.
    GeneralC = 2, "general_c";
    /// General purpose register D.
    GeneralD = 3, "general_d";
    /// General purpose register E.
    GeneralE = 4, "general_e";
    /// Address of the next byte dispatch or an immediate operand will consume.
    ProgramCounter = 5, "program_counter";
    /// Top of the data stack.
    StackPointer = 6, "stack_pointer";
    /// Top of the call stack.
    CallStackPointer = 7, "call_stack_pointer";
    /// Value produced by the last `add`/`sub`; tested by conditional control flow.
    Result = 8, "result";
    /// Holds a call target between its fetch and the jump.
    Scratch = 9, "scratch";
}

impl Register {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage for the register set, indexed by [`Register`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    values: [u8; Register::COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, register: Register) -> u8 {
        self.values[register.index()]
    }

    #[inline]
    pub fn set(&mut self, register: Register, value: u8) {
        self.values[register.index()] = value;
    }

    /// Zero every register, program counter included.
    pub fn clear(&mut self) {
        self.values = [0; Register::COUNT];
    }

    /// Iterate `(register, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u8)> + '_ {
        Register::ALL.iter().map(move |&r| (r, self.get(r)))
    }
}
