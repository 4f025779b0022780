//! Functional units used by the execution unit.

/// Integer Arithmetic Logic Unit.
pub mod alu;
