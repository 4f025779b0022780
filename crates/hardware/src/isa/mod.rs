//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `privileged`: Machine-mode system instructions and trap causes.

/// Immediate decoding for all RV32I instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction field extraction utilities.
pub mod instruction;

/// Privileged architecture definitions (traps, system instructions).
pub mod privileged;

/// Base integer instruction set (RV32I opcodes and function codes).
pub mod rv32i;
