//! Global System Constants.
//!
//! This module defines constants used across the model. It includes:
//! 1. **Memory Map:** Region bases and sizes decoded by the memory router.
//! 2. **Instruction Constants:** Instruction size and alignment masks.
//! 3. **Reset Values:** Program counter and memory defaults applied at construction.

/// Base address of the boot store region (ROM or SPI flash).
pub const BOOT_BASE: u32 = 0x0000_0000;

/// Size of the boot store region in bytes (512 MiB of address space).
pub const BOOT_SIZE: u32 = 0x2000_0000;

/// Base address of the RAM region.
pub const RAM_BASE: u32 = 0x2000_0000;

/// Size of the RAM region in bytes (512 MiB of address space).
///
/// The backing array is usually far smaller; offsets wrap inside it.
pub const RAM_REGION_SIZE: u32 = 0x2000_0000;

/// First address of the reserved peripheral range. Nothing responds here.
pub const PERIPHERAL_BASE: u32 = 0x4000_0000;

/// Default RAM size in 32-bit words (4 KiB).
pub const DEFAULT_RAM_WORDS: usize = 1024;

/// Largest flattened boot or RAM image accepted (16 MiB, the flash chip's
/// address space).
pub const MAX_IMAGE_BYTES: usize = 0x0100_0000;

/// Default physical flash offset at which the boot image lives (2 MiB).
pub const DEFAULT_FLASH_OFFSET: u32 = 0x0020_0000;

/// Program counter value after reset.
pub const RESET_PC: u32 = 0x0000_0000;

/// Size of an RV32I instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Mask selecting the byte offset within a 32-bit word.
pub const WORD_OFFSET_MASK: u32 = 0x3;

/// Number of integer registers.
pub const NUM_REGS: usize = 32;
