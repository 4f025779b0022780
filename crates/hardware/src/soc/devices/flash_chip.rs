//! Serial NOR flash chip model.
//!
//! The chip samples MOSI on each SPI clock while selected and decodes two
//! commands:
//!
//! - `0xAB` release from power-down (wake). Remaining bits are ignored.
//! - `0x03` read data, followed by a 24-bit address. After the last address
//!   bit the chip streams bytes from that address MSB-first, incrementing the
//!   address after every byte, until chip select is released.
//!
//! De-asserting chip select aborts any transfer. Bytes outside the image read
//! as `0xFF`, like erased flash.

use tracing::debug;

/// Release from power-down opcode.
pub const CMD_RELEASE_POWER_DOWN: u8 = 0xAB;

/// Read data opcode.
pub const CMD_READ: u8 = 0x03;

/// Mask of the chip's 24-bit address space.
pub const ADDR_MASK: u32 = 0x00FF_FFFF;

/// Value of an unprogrammed byte.
const ERASED: u8 = 0xFF;

/// A command decoded by the chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashCommand {
    /// Opcode byte.
    pub opcode: u8,
    /// Address for addressed commands.
    pub addr: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Command,
    Read { addr: u32, bit: u32 },
    Ignore,
}

/// Serial flash part holding a byte image at a physical base address.
#[derive(Clone, Debug)]
pub struct FlashChip {
    base: u32,
    image: Vec<u8>,
    mode: Mode,
    shift: u32,
    bits: u32,
    out: bool,
    awake: bool,
    commands: Vec<FlashCommand>,
}

impl FlashChip {
    /// Creates a chip whose image starts at flash address `base`.
    pub fn new(base: u32, image: Vec<u8>) -> Self {
        Self {
            base: base & ADDR_MASK,
            image,
            mode: Mode::Command,
            shift: 0,
            bits: 0,
            out: true,
            awake: false,
            commands: Vec::new(),
        }
    }

    /// Creates a chip from 32-bit words stored little-endian, so a word read
    /// through the controller returns the same word.
    pub fn from_words(base: u32, words: &[u32]) -> Self {
        Self::new(base, words.iter().flat_map(|w| w.to_le_bytes()).collect())
    }

    /// Returns the byte stored at flash address `addr`.
    pub fn byte(&self, addr: u32) -> u8 {
        (addr & ADDR_MASK)
            .checked_sub(self.base)
            .and_then(|off| self.image.get(off as usize).copied())
            .unwrap_or(ERASED)
    }

    /// Current level of the MISO output.
    pub const fn miso(&self) -> bool {
        self.out
    }

    /// Whether a release-from-power-down command has been received.
    pub const fn is_awake(&self) -> bool {
        self.awake
    }

    /// Commands decoded so far, oldest first.
    pub fn commands(&self) -> &[FlashCommand] {
        &self.commands
    }

    /// Physical flash address of the first image byte.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Image length in bytes.
    pub fn len(&self) -> usize {
        self.image.len()
    }

    /// Returns `true` if the image holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    fn data_bit(&self, addr: u32, bit: u32) -> bool {
        (self.byte(addr) >> bit) & 1 != 0
    }

    /// Advances the chip by one system tick.
    ///
    /// # Arguments
    ///
    /// * `cs`   - Chip select (active when `true`).
    /// * `sclk` - Whether the SPI clock toggles during this tick.
    /// * `mosi` - Level driven by the controller during this tick.
    ///
    /// MOSI is sampled on the rising SPI edge in the middle of the tick; MISO
    /// changes on the falling edge at its end.
    pub fn tick(&mut self, cs: bool, sclk: bool, mosi: bool) {
        if !cs {
            self.mode = Mode::Command;
            self.shift = 0;
            self.bits = 0;
            self.out = true;
            return;
        }
        if !sclk {
            return;
        }
        match self.mode {
            Mode::Command => {
                self.shift = (self.shift << 1) | u32::from(mosi);
                self.bits += 1;
                self.decode();
            }
            Mode::Read { addr, bit } => {
                let (addr, bit) = if bit == 0 {
                    ((addr + 1) & ADDR_MASK, 7)
                } else {
                    (addr, bit - 1)
                };
                self.mode = Mode::Read { addr, bit };
                self.out = self.data_bit(addr, bit);
            }
            Mode::Ignore => {}
        }
    }

    fn decode(&mut self) {
        let opcode = (self.shift >> self.bits.saturating_sub(8).min(24)) as u8;
        match (self.bits, opcode) {
            (8, CMD_RELEASE_POWER_DOWN) => {
                self.awake = true;
                self.record(FlashCommand { opcode, addr: None });
                self.mode = Mode::Ignore;
            }
            (8, CMD_READ) => {}
            (8, _) => {
                debug!(opcode, "flash: unsupported command");
                self.record(FlashCommand { opcode, addr: None });
                self.mode = Mode::Ignore;
            }
            (32, _) => {
                let addr = self.shift & ADDR_MASK;
                self.record(FlashCommand {
                    opcode: CMD_READ,
                    addr: Some(addr),
                });
                self.mode = Mode::Read { addr, bit: 7 };
                self.out = self.data_bit(addr, 7);
            }
            _ => {}
        }
    }

    fn record(&mut self, cmd: FlashCommand) {
        debug!(opcode = cmd.opcode, addr = ?cmd.addr, "flash: command");
        self.commands.push(cmd);
    }
}
