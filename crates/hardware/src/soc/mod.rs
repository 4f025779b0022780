//! Memory subsystem components.
//!
//! This module organizes the components the core talks to over its buses:
//! the bus signal bundles, the memory stores, the SPI boot flash, the router,
//! and the builder that assembles them.

/// System builder for assembling the memory map.
pub mod builder;

/// SPI boot flash controller and chip model.
pub mod devices;

/// Bus routing and arbitration.
pub mod interconnect;

/// RAM and ROM stores.
pub mod memory;

/// Bus signal and target trait definitions.
pub mod traits;

pub use builder::{BootImage, System};
pub use interconnect::{BusKind, MemoryRouter};
