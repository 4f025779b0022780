//! Core processor implementation.
//!
//! This module contains the execution unit state machine, the architectural
//! CSR bank, and the functional units it drives.

/// Architecture-specific components (CSR table and access policy).
pub mod arch;

/// Execution unit: fetch/decode/execute/trap state machine.
pub mod cpu;

/// Functional units (ALU).
pub mod units;

pub use self::cpu::Cpu;
