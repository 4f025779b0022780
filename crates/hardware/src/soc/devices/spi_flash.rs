//! SPI flash read controller.
//!
//! Presents the serial boot flash as a read-only word target. Each bus read
//! becomes one "read data" transfer: the 8-bit opcode `0x03` and a 24-bit
//! flash address shifted out MSB-first, then 32 bits shifted in. The received
//! bytes are assembled little-endian, so flash byte `a` lands in bits `7:0`.
//!
//! The controller runs one SPI clock per system tick. After reset it wakes the
//! chip with `0xAB` and waits out the power-up delay before accepting reads.
//! Writes are treated as reads.

use tracing::{debug, trace};

use super::flash_chip::{ADDR_MASK, FlashChip};
use crate::soc::traits::{BusRequest, BusResponse, BusTarget};

/// Command word for "read data" with the address field cleared.
const READ_COMMAND: u32 = 0x0300_0000;

/// Command word for "release from power-down".
const WAKE_COMMAND: u32 = 0xAB00_0000;

/// Power-up tick at which chip select is released.
const POWERUP_DESELECT: u32 = 8;

/// Power-up tick after which the controller accepts requests.
const POWERUP_DONE: u32 = 30;

/// Bits in a command-plus-address frame, minus one.
const TX_LAST_BIT: u32 = 31;

/// Width mask of the down-counter.
const COUNTER_MASK: u32 = 0x3F;

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpiState {
    /// Issue the wake command.
    #[default]
    Reset,
    /// Shifting the wake command and waiting out the power-up delay.
    PowerUp,
    /// Idle, waiting for a bus request.
    Waiting,
    /// Shifting out the read command and address.
    Tx,
    /// Shifting in the data word.
    Rx,
}

/// Pin levels driven by the controller during the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpiPins {
    /// Chip select, active high in this model.
    pub cs: bool,
    /// Whether the serial clock toggles this tick.
    pub sclk: bool,
    /// Controller output.
    pub mosi: bool,
}

/// Bus target that reads words from a serial flash chip.
#[derive(Clone, Debug)]
pub struct SpiFlash {
    state: SpiState,
    spio: u32,
    dc: u32,
    cs: bool,
    ack: bool,
    dat_r: u32,
    region_base: u32,
    chip: FlashChip,
}

impl SpiFlash {
    /// Creates a controller in front of `chip`.
    ///
    /// `region_base` is added to every bus offset to form the flash address.
    pub const fn new(chip: FlashChip, region_base: u32) -> Self {
        Self {
            state: SpiState::Reset,
            spio: READ_COMMAND,
            dc: 0,
            cs: false,
            ack: false,
            dat_r: 0,
            region_base,
            chip,
        }
    }

    /// Current controller state.
    pub const fn state(&self) -> SpiState {
        self.state
    }

    /// Whether the power-up sequence has finished and no transfer is running.
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, SpiState::Waiting)
    }

    /// Flash address added to bus offsets.
    pub const fn region_base(&self) -> u32 {
        self.region_base
    }

    /// The attached chip.
    pub const fn chip(&self) -> &FlashChip {
        &self.chip
    }

    /// Pin levels for the current tick, derived from registered state.
    pub const fn pins(&self) -> SpiPins {
        let shifting = matches!(self.state, SpiState::PowerUp | SpiState::Tx);
        SpiPins {
            cs: self.cs,
            sclk: shifting || matches!(self.state, SpiState::Rx),
            mosi: shifting && (self.spio >> 31) & 1 != 0,
        }
    }

    const fn count_down(&self) -> u32 {
        self.dc.wrapping_sub(1) & COUNTER_MASK
    }
}

impl BusTarget for SpiFlash {
    fn name(&self) -> &'static str {
        "spi_flash"
    }

    fn response(&self) -> BusResponse {
        BusResponse {
            ack: self.ack,
            data: self.dat_r,
        }
    }

    fn clock(&mut self, req: &BusRequest) {
        let pins = self.pins();
        let miso = self.chip.miso();
        self.chip.tick(pins.cs, pins.sclk, pins.mosi);

        let dc = self.dc;
        match self.state {
            SpiState::Reset => {
                self.cs = true;
                self.spio = WAKE_COMMAND;
                self.state = SpiState::PowerUp;
            }
            SpiState::PowerUp => {
                self.spio <<= 1;
                self.dc = (dc + 1) & COUNTER_MASK;
                if dc == POWERUP_DONE {
                    debug!("spi: power-up complete");
                    self.state = SpiState::Waiting;
                } else if dc >= POWERUP_DESELECT {
                    self.cs = false;
                }
            }
            SpiState::Waiting => {
                let pending = self.ack;
                self.ack = req.cyc && req.stb && pending;
                self.cs = false;
                if req.cyc && req.stb && !pending {
                    let addr = req.addr.wrapping_add(self.region_base) & ADDR_MASK;
                    debug!(addr = format_args!("{addr:#08x}"), "spi: read");
                    self.spio = READ_COMMAND | addr;
                    self.cs = true;
                    self.ack = false;
                    self.dc = TX_LAST_BIT;
                    self.state = SpiState::Tx;
                }
            }
            SpiState::Tx => {
                self.dc = self.count_down();
                self.spio <<= 1;
                if dc == 0 {
                    self.dc = 7;
                    self.dat_r = 0;
                    self.state = SpiState::Rx;
                }
            }
            SpiState::Rx => {
                self.dc = self.count_down();
                self.dat_r |= u32::from(miso) << dc;
                if dc & 7 == 0 {
                    if (dc >> 3) & 3 == 3 {
                        trace!(data = format_args!("{:#010x}", self.dat_r), "spi: word");
                        self.cs = false;
                        self.ack = req.cyc;
                        self.state = SpiState::Waiting;
                    } else {
                        self.dc = dc + 15;
                    }
                }
            }
        }
    }

    /// Restarts the power-up sequence. The chip keeps its image and command log.
    fn reset(&mut self) {
        self.state = SpiState::Reset;
        self.spio = READ_COMMAND;
        self.dc = 0;
        self.cs = false;
        self.ack = false;
        self.dat_r = 0;
    }

    fn as_flash(&self) -> Option<&SpiFlash> {
        Some(self)
    }
}
