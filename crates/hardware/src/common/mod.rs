//! Common utilities and types used throughout the RV32I core model.
//!
//! This module provides the building blocks shared by the core, the bus and the
//! simulator. It includes:
//! 1. **Constants:** The fixed memory map, reset values and instruction geometry.
//! 2. **Memory Access:** Access kinds and transfer widths carried on the buses.
//! 3. **Error Handling:** Architectural traps and host-side simulator errors.
//! 4. **Register Management:** The 32-entry integer register file.

/// Memory map and architectural constants.
pub mod constants;

/// Memory access type and transfer width definitions.
pub mod data;

/// Trap definitions and simulator error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::{AccessType, Width};
pub use error::{SimError, Trap};
pub use reg::RegisterFile;
