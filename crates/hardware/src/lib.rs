//! RV32I core model library.
//!
//! This crate implements a cycle-stepped RISC-V RV32I core with the following:
//! 1. **Core:** Fetch/decode/execute state machine, integer ALU, and a table-driven CSR file.
//! 2. **Memory:** RAM and ROM with a registered Wishbone-style handshake.
//! 3. **Boot Flash:** An SPI flash read controller and a model of the serial chip behind it.
//! 4. **Interconnect:** Instruction and data bus routing with per-target arbitration.
//! 5. **Simulation:** Loader, configuration, disassembler, and statistics collection.

/// Common types and constants (memory map, registers, traps, access widths).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (execution unit, CSR file, ALU).
pub mod core;
/// Instruction set (field extraction, immediates, opcodes, disassembly).
pub mod isa;
/// Simulator driver and image loader.
pub mod sim;
/// Memory system (builder, router, stores, SPI flash, bus traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse JSON.
pub use crate::config::Config;
/// Main CPU type; holds PC, registers, CSRs, control state and stats.
pub use crate::core::Cpu;
/// Tick driver owning a `Cpu` and a `System`.
pub use crate::sim::Simulator;
/// Memory system (router and stores); construct with `System::new`.
pub use crate::soc::System;
