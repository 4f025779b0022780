//! Memory Access Types.
//!
//! This module defines the classification of bus accesses used throughout the model.
//! These types are used for the following:
//! 1. **Bus Qualification:** The width selector that accompanies every data-bus transfer.
//! 2. **Alignment Checks:** Deciding which addresses trap as misaligned for each width.
//! 3. **Statistics Tracking:** Categorizing memory operations for reporting.

/// Direction of a data-bus access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data load on the data bus.
    Read,

    /// Data store on the data bus.
    Write,
}

/// Transfer width of a bus transaction.
///
/// Encoded the same way as the low two bits of the load/store `funct3` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Width {
    /// Single byte (8 bits).
    Byte,
    /// Halfword (16 bits).
    Half,
    /// Full word (32 bits).
    #[default]
    Word,
}

impl Width {
    /// Decodes the width from a load/store `funct3` field.
    ///
    /// Only the low two bits are significant; the unused encoding `0b11`
    /// falls back to a full word.
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 & 0b11 {
            0b00 => Self::Byte,
            0b01 => Self::Half,
            _ => Self::Word,
        }
    }

    /// Number of bytes moved by this width.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }

    /// Bit mask covering the low `bytes()` lanes of a word.
    pub const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0x0000_00FF,
            Self::Half => 0x0000_FFFF,
            Self::Word => 0xFFFF_FFFF,
        }
    }

    /// Returns `true` if an access of this width at `addr` is considered aligned.
    ///
    /// Bytes are always aligned. Halfwords are misaligned only when both low
    /// address bits are set, while words need both low bits clear.
    pub const fn is_aligned(self, addr: u32) -> bool {
        match self {
            Self::Byte => true,
            Self::Half => addr & 0b11 != 0b11,
            Self::Word => addr & 0b11 == 0,
        }
    }
}
