//! ROM store.
//!
//! A read-only word array built from a caller image. Reads behave like RAM
//! reads; writes are acknowledged and discarded. Offsets beyond the image read
//! as zero.

use super::{Handshake, lane_shift};
use crate::sim::loader::words_from_le_bytes;
use crate::soc::traits::{BusRequest, BusResponse, BusTarget};

/// Synchronous read-only memory with a two-cycle acknowledge.
#[derive(Clone, Debug, Default)]
pub struct Rom {
    words: Vec<u32>,
    handshake: Handshake,
    dat_r: u32,
}

impl Rom {
    /// Creates a ROM holding `words` in address order.
    pub const fn new(words: Vec<u32>) -> Self {
        Self {
            words,
            handshake: Handshake::new(),
            dat_r: 0,
        }
    }

    /// Creates a ROM from a little-endian byte image, zero-padding the last word.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(words_from_le_bytes(bytes))
    }

    /// Image size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.words.len() * 4
    }

    /// Reads the word containing `offset`, shifted so the addressed byte is in
    /// the low lane.
    pub fn read(&self, offset: u32) -> u32 {
        self.words
            .get((offset >> 2) as usize)
            .map_or(0, |word| word >> lane_shift(offset))
    }

    /// Image contents in address order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl BusTarget for Rom {
    fn name(&self) -> &'static str {
        "ROM"
    }

    fn response(&self) -> BusResponse {
        BusResponse {
            ack: self.handshake.ack(),
            data: self.dat_r,
        }
    }

    fn clock(&mut self, req: &BusRequest) {
        let _ = self.handshake.clock(req.is_active());
        if req.is_active() {
            self.dat_r = self.read(req.addr);
        }
    }

    fn reset(&mut self) {
        self.handshake.reset();
        self.dat_r = 0;
    }
}
