//! RV32I Base Integer Instruction Set.
//!
//! Major opcodes and function codes for the 32-bit base integer ISA.

/// `funct3` values for branches, loads, stores and ALU operations.
pub mod funct3;

/// `funct7` values for register-register ALU operations and shifts.
pub mod funct7;

/// Major opcodes (bits 6-0).
pub mod opcodes;
