//! System construction and top-level `System` type.
//!
//! This module assembles the memory subsystem from configuration. It performs:
//! 1. **Boot store:** Creates a ROM or an SPI flash controller (with its chip)
//!    holding the boot image.
//! 2. **RAM:** Creates the RAM array with the configured size.
//! 3. **Memory map:** Maps both stores on the instruction and data buses.

use tracing::info;

use crate::common::SimError;
use crate::common::constants::{BOOT_BASE, BOOT_SIZE, MAX_IMAGE_BYTES, RAM_BASE, RAM_REGION_SIZE};
use crate::config::{BootSource, Config};
use crate::sim::loader::words_from_le_bytes;
use crate::soc::devices::flash_chip::ADDR_MASK;
use crate::soc::devices::{FlashChip, SpiFlash};
use crate::soc::interconnect::{BusKind, MemoryRouter};
use crate::soc::memory::{Ram, Rom};

/// Size of the flash chip's address space in bytes.
const FLASH_CAPACITY: usize = ADDR_MASK as usize + 1;

/// Contents of the boot store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootImage {
    /// Raw bytes in address order.
    Bytes(Vec<u8>),
    /// 32-bit words in address order.
    Words(Vec<u32>),
}

impl BootImage {
    /// Image length in bytes.
    pub fn len_bytes(&self) -> usize {
        match self {
            Self::Bytes(b) => b.len(),
            Self::Words(w) => w.len() * 4,
        }
    }

    /// Returns `true` if the image holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len_bytes() == 0
    }

    /// Image as words, padding a partial tail word with zeros.
    pub fn into_words(self) -> Vec<u32> {
        match self {
            Self::Bytes(b) => words_from_le_bytes(&b),
            Self::Words(w) => w,
        }
    }

    /// Image as little-endian bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(b) => b,
            Self::Words(w) => w.iter().flat_map(|w| w.to_le_bytes()).collect(),
        }
    }
}

impl From<Vec<u32>> for BootImage {
    fn from(words: Vec<u32>) -> Self {
        Self::Words(words)
    }
}

impl From<Vec<u8>> for BootImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// The memory subsystem seen by the core.
#[derive(Debug)]
pub struct System {
    /// Router connecting both buses to the stores.
    pub router: MemoryRouter,
    /// Boot store selected at construction.
    pub boot_source: BootSource,
    boot_idx: usize,
    ram_idx: usize,
}

impl System {
    /// Builds the system from configuration and a boot image.
    ///
    /// # Errors
    ///
    /// Returns `SimError::EmptyImage` if the image is empty and
    /// `SimError::ImageTooLarge` if it does not fit the boot store.
    pub fn new(config: &Config, image: BootImage) -> Result<Self, SimError> {
        if image.is_empty() {
            return Err(SimError::EmptyImage);
        }
        let bytes = image.len_bytes();
        let source = config.boot.source;
        let mut router = MemoryRouter::new();

        let boot_idx = match source {
            BootSource::Rom => {
                check_fits("ROM", bytes, MAX_IMAGE_BYTES)?;
                router.add_target(Box::new(Rom::new(image.into_words())))
            }
            BootSource::Flash => {
                let offset = config.boot.flash_offset & ADDR_MASK;
                check_fits("flash", bytes, FLASH_CAPACITY - offset as usize)?;
                let chip = FlashChip::new(offset, image.into_bytes());
                router.add_target(Box::new(SpiFlash::new(chip, offset)))
            }
        };
        let ram_idx = router.add_target(Box::new(Ram::new(config.memory.ram_words)));

        for bus in [BusKind::Instruction, BusKind::Data] {
            router.map(bus, BOOT_BASE, BOOT_SIZE, boot_idx);
            router.map(bus, RAM_BASE, RAM_REGION_SIZE, ram_idx);
        }

        info!(
            boot = ?source,
            image_bytes = bytes,
            ram_words = config.memory.ram_words,
            "system: built"
        );
        Ok(Self {
            router,
            boot_source: source,
            boot_idx,
            ram_idx,
        })
    }

    /// Router index of the boot store.
    pub const fn boot_target(&self) -> usize {
        self.boot_idx
    }

    /// Router index of the RAM.
    pub const fn ram_target(&self) -> usize {
        self.ram_idx
    }

    /// The RAM.
    pub fn ram(&self) -> Option<&Ram> {
        self.router.target(self.ram_idx).and_then(|t| t.as_ram())
    }

    /// The RAM, mutably.
    pub fn ram_mut(&mut self) -> Option<&mut Ram> {
        self.router.target_mut(self.ram_idx).and_then(|t| t.as_ram_mut())
    }

    /// The SPI flash controller when booting from flash.
    pub fn flash(&self) -> Option<&SpiFlash> {
        self.router.target(self.boot_idx).and_then(|t| t.as_flash())
    }

    /// Copies `words` into RAM starting at byte offset `offset` within the RAM.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ImageTooLarge` if the words run past the end of RAM.
    pub fn load_ram(&mut self, offset: u32, words: &[u32]) -> Result<(), SimError> {
        let Some(ram) = self.ram_mut() else {
            return Ok(());
        };
        let capacity = ram.size_bytes().saturating_sub(offset as usize);
        check_fits("RAM", words.len() * 4, capacity)?;
        ram.load_words(offset, words);
        info!(offset, words = words.len(), "system: RAM loaded");
        Ok(())
    }
}

const fn check_fits(what: &'static str, bytes: usize, capacity: usize) -> Result<(), SimError> {
    if bytes > capacity {
        Err(SimError::ImageTooLarge {
            what,
            bytes,
            capacity,
        })
    } else {
        Ok(())
    }
}
