//! Integer Register File.
//!
//! Plain storage for the 32 RV32I integer registers. The file itself does not
//! special-case `x0`: the core discards writes to index 0 at its commit step, so
//! slot 0 is never written during execution and always reads back 0.

use std::fmt;

use super::constants::NUM_REGS;
use crate::isa::disasm::reg_name;

/// 32 general-purpose registers, reset to zero.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads register `idx` (0-31). Indices are masked to five bits.
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u32 {
        self.regs[idx & 0x1F]
    }

    /// Stores `val` into register `idx` (0-31) without any `x0` policy.
    ///
    /// Callers that model architectural writes must skip index 0 themselves.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, val: u32) {
        self.regs[idx & 0x1F] = val;
    }

    /// Returns all registers as a slice ordered by index.
    pub const fn as_slice(&self) -> &[u32; NUM_REGS] {
        &self.regs
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.regs.iter()).finish()
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_REGS / 4 {
            for col in 0..4 {
                let idx = row + col * (NUM_REGS / 4);
                write!(f, "x{:<2} {:>4} = {:#010x}   ", idx, reg_name(idx), self.regs[idx])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
