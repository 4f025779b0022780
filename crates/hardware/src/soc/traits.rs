//! Bus target trait and Wishbone-style signal bundles.
//!
//! This module defines what travels on the instruction and data buses and the
//! trait implemented by every store attached to them. It provides:
//! 1. **Signals:** `BusRequest` (initiator to target) and `BusResponse` (target to initiator).
//! 2. **Two-phase Clocking:** Targets expose registered outputs through `response` and
//!    advance one clock edge in `clock`, so a response never reflects the same tick's request.
//! 3. **Downcasting:** Optional casts to `Ram` or `SpiFlash` for harness-side inspection.

use crate::common::Width;
use crate::soc::devices::SpiFlash;
use crate::soc::memory::Ram;

/// Signals driven by a bus initiator for one clock tick.
///
/// `cyc` and `stb` are asserted together and held until `ack` is seen.
/// `addr` is a byte address; targets receive it translated to a local offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// Bus cycle in progress.
    pub cyc: bool,
    /// Valid transfer strobe.
    pub stb: bool,
    /// Write enable (store) when set, read (load/fetch) otherwise.
    pub we: bool,
    /// Byte address.
    pub addr: u32,
    /// Write data (stores only).
    pub data: u32,
    /// Transfer width qualifying stores.
    pub width: Width,
}

impl BusRequest {
    /// An idle bus: no cycle, no strobe.
    pub const IDLE: Self = Self {
        cyc: false,
        stb: false,
        we: false,
        addr: 0,
        data: 0,
        width: Width::Word,
    };

    /// A word read at `addr`.
    pub const fn read(addr: u32) -> Self {
        Self {
            cyc: true,
            stb: true,
            we: false,
            addr,
            data: 0,
            width: Width::Word,
        }
    }

    /// A read of `width` at `addr`.
    pub const fn load(addr: u32, width: Width) -> Self {
        Self {
            width,
            ..Self::read(addr)
        }
    }

    /// A write of `width` carrying `data` at `addr`.
    pub const fn write(addr: u32, data: u32, width: Width) -> Self {
        Self {
            cyc: true,
            stb: true,
            we: true,
            addr,
            data,
            width,
        }
    }

    /// Returns `true` while the initiator requests a transfer.
    pub const fn is_active(&self) -> bool {
        self.cyc && self.stb
    }

    /// Copy of this request with its address replaced.
    pub const fn with_addr(self, addr: u32) -> Self {
        Self { addr, ..self }
    }
}

/// Registered outputs of a bus target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Transfer acknowledge.
    pub ack: bool,
    /// Read data, valid while `ack` is set.
    pub data: u32,
}

/// A store attached to the memory router.
///
/// The router calls `response` for every initiator before any target is
/// clocked, then calls `clock` once per tick with the request granted by the
/// target's arbiter (or `BusRequest::IDLE`). Request addresses passed to
/// `clock` are offsets local to the target's region.
pub trait BusTarget {
    /// Returns a short name for this target (e.g., `"ROM"`, `"RAM"`).
    fn name(&self) -> &'static str;
    /// Returns the registered acknowledge and read data.
    fn response(&self) -> BusResponse;
    /// Advances the target by one clock edge.
    fn clock(&mut self, req: &BusRequest);
    /// Returns the target's registers to their reset values, keeping its contents.
    fn reset(&mut self);

    /// Returns a reference as `Ram` if this target is RAM; otherwise `None`.
    fn as_ram(&self) -> Option<&Ram> {
        None
    }
    /// Returns a mutable reference as `Ram` if this target is RAM; otherwise `None`.
    fn as_ram_mut(&mut self) -> Option<&mut Ram> {
        None
    }
    /// Returns a reference as `SpiFlash` if this target is the flash controller.
    fn as_flash(&self) -> Option<&SpiFlash> {
        None
    }
}
