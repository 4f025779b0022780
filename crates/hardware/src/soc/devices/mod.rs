//! Serial boot flash.
//!
//! This module contains the bit-serial boot store. It provides:
//! 1. **Controller:** `SpiFlash`, the bus target that turns word reads into
//!    SPI "read data" transfers.
//! 2. **Chip:** `FlashChip`, a model of the serial NOR part on the other end of
//!    the wires, holding the boot image.

/// Serial flash chip model.
pub mod flash_chip;

/// SPI flash read controller.
pub mod spi_flash;

pub use flash_chip::{FlashChip, FlashCommand};
pub use spi_flash::{SpiFlash, SpiPins, SpiState};
