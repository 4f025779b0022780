//! Word-Addressed Backing Stores.
//!
//! This module implements the synchronous on-chip memories. It provides:
//! 1. **Handshake:** The shared two-register acknowledge pipeline
//!    (`rws <= cyc; ack <= cyc & rws`) that places `ack` two clock edges after
//!    a cycle is first observed.
//! 2. **RAM:** A read-write word array with byte-lane writes.
//! 3. **ROM:** A read-only word array initialised from an image.
//!
//! Both stores return the addressed word shifted right by `8 * (addr & 3)`, so the
//! requested byte appears in the low lane.

/// Read-write RAM store.
pub mod ram;

/// Read-only ROM store.
pub mod rom;

pub use ram::Ram;
pub use rom::Rom;

use crate::common::constants::WORD_OFFSET_MASK;

/// Fixed two-cycle acknowledge latency shared by RAM and ROM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Handshake {
    rws: bool,
    ack: bool,
}

impl Handshake {
    /// Returns an idle handshake.
    pub const fn new() -> Self {
        Self {
            rws: false,
            ack: false,
        }
    }

    /// Clocks the pipeline with the current `cyc` level.
    ///
    /// Returns `true` on the edge where `ack` rises, which is when stores
    /// commit their write data.
    pub const fn clock(&mut self, cyc: bool) -> bool {
        let rising = cyc && self.rws && !self.ack;
        self.ack = cyc && self.rws;
        self.rws = cyc;
        rising
    }

    /// Registered acknowledge output.
    pub const fn ack(&self) -> bool {
        self.ack
    }

    /// Clears both registers.
    pub const fn reset(&mut self) {
        self.rws = false;
        self.ack = false;
    }
}

/// Byte shift selected by the low address bits of a read.
#[inline(always)]
pub(crate) const fn lane_shift(addr: u32) -> u32 {
    (addr & WORD_OFFSET_MASK) * 8
}
