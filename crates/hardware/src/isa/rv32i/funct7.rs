//! RV32I `funct7` encodings.

/// Default `funct7` (ADD, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate `funct7` (SUB, SRA). Sets instruction bit 30.
pub const SUB_SRA: u32 = 0b0100000;
