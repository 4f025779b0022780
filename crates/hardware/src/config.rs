//! Configuration system for the rvmini core.
//!
//! This module defines the structures used to parameterize a simulation. It provides:
//! 1. **Defaults:** Baseline constants (RAM size, boot offset, cycle budget).
//! 2. **Structures:** Hierarchical config for general run options, memory and boot source.
//! 3. **Loading:** JSON parsing from a string or a file via `serde_json`.
//!
//! Every field is optional in JSON; missing fields take the values in `defaults`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;
use crate::common::constants::{DEFAULT_FLASH_OFFSET, DEFAULT_RAM_WORDS};

/// Default configuration constants.
mod defaults {
    /// RAM array size in 32-bit words (4 KiB).
    pub const RAM_WORDS: usize = super::DEFAULT_RAM_WORDS;

    /// Flash address of the boot image when booting from SPI flash (2 MiB).
    ///
    /// Leaves the low flash area free for an FPGA bitstream.
    pub const FLASH_OFFSET: u32 = super::DEFAULT_FLASH_OFFSET;

    /// Cycle budget for a single run before the watchdog fires.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Store that backs the boot region at address 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BootSource {
    /// Parallel read-only memory initialized with the image.
    #[default]
    Rom,
    /// Bit-serial SPI flash holding the image at `flash_offset`.
    #[serde(alias = "SPI", alias = "Spi")]
    Flash,
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Run options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory sizing.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Boot store selection.
    #[serde(default)]
    pub boot: BootConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if the text is not valid configuration JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` if the file cannot be read and
    /// `SimError::Config` if its contents do not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// General run options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every retired instruction at trace level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Cycle budget for `Simulator::step` and `Simulator::run_instructions`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Memory sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// RAM array size in words. Offsets beyond it wrap.
    #[serde(default = "MemoryConfig::default_ram_words")]
    pub ram_words: usize,
}

impl MemoryConfig {
    const fn default_ram_words() -> usize {
        defaults::RAM_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_words: defaults::RAM_WORDS,
        }
    }
}

/// Boot store selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BootConfig {
    /// Store mapped at the boot region.
    #[serde(default)]
    pub source: BootSource,

    /// Flash address added to every boot-region offset when booting from flash.
    #[serde(default = "BootConfig::default_flash_offset")]
    pub flash_offset: u32,
}

impl BootConfig {
    const fn default_flash_offset() -> u32 {
        defaults::FLASH_OFFSET
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            source: BootSource::Rom,
            flash_offset: defaults::FLASH_OFFSET,
        }
    }
}
