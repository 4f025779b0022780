//! Simulation driver and image loading.
//!
//! Provides the `Simulator` that clocks the core against the memory system,
//! and utilities for turning files into boot and RAM images.

/// Raw binary and ELF image loading.
pub mod loader;

/// Tick-level simulation driver.
pub mod simulator;

pub use simulator::Simulator;
