//! Trap and simulator error definitions.
//!
//! This module defines the two failure domains of the model. It provides:
//! 1. **Trap Representation:** Every synchronous exception the core can raise,
//!    with its `mcause` exception code and optional `mtval` payload.
//! 2. **Host Errors:** Failures outside the architecture (image files, configuration,
//!    ELF parsing, run budgets) that are reported to the caller as `Result`s.
//!
//! Traps never leave the core as errors: they redirect execution to the handler
//! selected by `mtvec`. `SimError` never touches architectural state.

use std::fmt;
use std::path::PathBuf;

use crate::isa::privileged::cause::exception;

/// RISC-V synchronous exceptions raised by the core.
///
/// Each variant maps to one machine-mode exception code. Variants carrying a
/// value record the faulting address that is written to `mtval`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// Raised before any bus activity when the program counter is not a
    /// multiple of four. The associated value is the misaligned PC.
    InstructionAddressMisaligned(u32),

    /// Illegal instruction exception.
    ///
    /// Part of the cause table only: this core executes unknown encodings as
    /// no-ops and never raises it.
    IllegalInstruction(u32),

    /// Breakpoint exception raised by `EBREAK`.
    Breakpoint,

    /// Load address misaligned exception.
    ///
    /// The associated value is the effective address of the load.
    LoadAddressMisaligned(u32),

    /// Store address misaligned exception.
    ///
    /// The associated value is the effective address of the store.
    StoreAddressMisaligned(u32),

    /// Environment call from machine mode, raised by `ECALL`.
    EnvironmentCallFromMMode,
}

impl Trap {
    /// Returns the exception code written to `mcause.ecode`.
    pub const fn cause(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint => exception::BREAKPOINT,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
        }
    }

    /// Returns the value written to `mtval`, if this trap updates it.
    ///
    /// `ECALL`, `EBREAK` and the never-raised illegal instruction leave `mtval`
    /// untouched.
    pub const fn tval(&self) -> Option<u32> {
        match self {
            Self::InstructionAddressMisaligned(addr)
            | Self::LoadAddressMisaligned(addr)
            | Self::StoreAddressMisaligned(addr) => Some(*addr),
            Self::IllegalInstruction(_) | Self::Breakpoint | Self::EnvironmentCallFromMMode => {
                None
            }
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#010x})")
            }
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#010x})"),
            Self::Breakpoint => write!(f, "Breakpoint"),
            Self::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({addr:#010x})"),
            Self::StoreAddressMisaligned(addr) => {
                write!(f, "StoreAddressMisaligned({addr:#010x})")
            }
            Self::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
        }
    }
}

impl std::error::Error for Trap {}

/// Host-side failures reported by the loader, configuration and run helpers.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An image or configuration file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON configuration document was malformed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An ELF image could not be parsed.
    #[error("invalid ELF image: {0}")]
    Elf(#[from] object::Error),

    /// An ELF image was well formed but not a 32-bit little-endian RISC-V executable.
    #[error("unsupported ELF image: {0}")]
    UnsupportedElf(&'static str),

    /// An image does not fit the store it was meant for.
    #[error("{what} image is {bytes} bytes but only {capacity} bytes are available")]
    ImageTooLarge {
        /// Which store rejected the image.
        what: &'static str,
        /// Size of the rejected image in bytes.
        bytes: usize,
        /// Capacity of the store in bytes.
        capacity: usize,
    },

    /// An image contained no loadable bytes.
    #[error("image contains no loadable data")]
    EmptyImage,

    /// A run helper exhausted its cycle budget before reaching its goal.
    #[error("cycle budget exhausted after {cycles} cycles ({retired} instructions retired)")]
    CycleBudgetExceeded {
        /// Cycles elapsed when the budget ran out.
        cycles: u64,
        /// Instructions retired by then.
        retired: u64,
    },
}
