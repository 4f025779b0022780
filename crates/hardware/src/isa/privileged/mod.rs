//! Privileged Architecture Definitions.
//!
//! Machine-mode exception codes and the encodings of system instructions.

/// Exception cause codes.
pub mod cause;

/// System instruction opcodes and function codes.
pub mod opcodes;
