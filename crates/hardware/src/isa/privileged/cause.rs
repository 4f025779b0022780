//! RISC-V Trap Cause Codes.
//!
//! This module defines the exception codes written to `mcause.ecode`. The core
//! raises only synchronous exceptions; the interrupt flag (`mcause` bit 31) is
//! always cleared on trap entry.

/// Value of the `mcause` interrupt flag for synchronous exceptions.
pub const INTERRUPT_FLAG_EXCEPTION: u32 = 0;

/// Exception definitions.
pub mod exception {
    /// Instruction address misaligned (1).
    ///
    /// This core reports misaligned fetches with code 1, sharing the slot the
    /// privileged architecture assigns to instruction access faults.
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u32 = 1;
    /// Illegal instruction (2). Defined, never raised.
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// Breakpoint (3).
    pub const BREAKPOINT: u32 = 3;
    /// Load address misaligned (4).
    pub const LOAD_ADDRESS_MISALIGNED: u32 = 4;
    /// Store address misaligned (6).
    pub const STORE_ADDRESS_MISALIGNED: u32 = 6;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
}
