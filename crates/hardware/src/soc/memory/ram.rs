//! RAM store.
//!
//! A word array sized at construction. Each write replaces only the byte lanes
//! selected by its width starting at `addr & 3`:
//!
//! | Width | Offsets that write | Lanes replaced               |
//! |-------|--------------------|------------------------------|
//! | Byte  | 0, 1, 2, 3         | the addressed byte           |
//! | Half  | 0, 1, 2            | two bytes from the offset    |
//! | Word  | 0                  | all four bytes               |
//!
//! A halfword at offset 3 and a word at any non-zero offset leave the word
//! unchanged. Offsets past the end of the array wrap around it.

use super::{Handshake, lane_shift};
use crate::common::Width;
use crate::common::constants::DEFAULT_RAM_WORDS;
use crate::soc::traits::{BusRequest, BusResponse, BusTarget};

/// Synchronous read-write memory with a two-cycle acknowledge.
#[derive(Clone, Debug)]
pub struct Ram {
    words: Vec<u32>,
    handshake: Handshake,
    dat_r: u32,
}

impl Default for Ram {
    fn default() -> Self {
        Self::new(DEFAULT_RAM_WORDS)
    }
}

impl Ram {
    /// Creates a zero-filled RAM of `size_words` 32-bit words (at least one).
    pub fn new(size_words: usize) -> Self {
        Self {
            words: vec![0; size_words.max(1)],
            handshake: Handshake::new(),
            dat_r: 0,
        }
    }

    /// Number of 32-bit words in the array.
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    /// Capacity in bytes.
    pub fn size_bytes(&self) -> usize {
        self.words.len() * 4
    }

    fn index(&self, offset: u32) -> usize {
        (offset >> 2) as usize % self.words.len()
    }

    /// Reads the word containing `offset`, shifted so the addressed byte is in
    /// the low lane. Harness-side access; does not touch the handshake.
    pub fn read(&self, offset: u32) -> u32 {
        self.words[self.index(offset)] >> lane_shift(offset)
    }

    /// Returns the aligned word containing `offset`.
    pub fn word(&self, offset: u32) -> u32 {
        self.words[self.index(offset)]
    }

    /// Applies a lane-masked write at `offset`. Harness-side access.
    pub fn write(&mut self, offset: u32, data: u32, width: Width) {
        let shift = lane_shift(offset);
        if shift / 8 + width.bytes() > 4 {
            return;
        }
        let mask = width.mask() << shift;
        let idx = self.index(offset);
        self.words[idx] = (self.words[idx] & !mask) | ((data << shift) & mask);
    }

    /// Copies little-endian `bytes` into the array starting at byte `offset`.
    pub fn load_bytes(&mut self, offset: u32, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.write(offset.wrapping_add(i as u32), u32::from(*byte), Width::Byte);
        }
    }

    /// Copies `words` into the array starting at the word containing `offset`.
    pub fn load_words(&mut self, offset: u32, words: &[u32]) {
        for (i, word) in words.iter().enumerate() {
            let idx = self.index(offset.wrapping_add((i as u32) * 4) & !0b11);
            self.words[idx] = *word;
        }
    }

    /// All words in address order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl BusTarget for Ram {
    fn name(&self) -> &'static str {
        "RAM"
    }

    fn response(&self) -> BusResponse {
        BusResponse {
            ack: self.handshake.ack(),
            data: self.dat_r,
        }
    }

    fn clock(&mut self, req: &BusRequest) {
        let commit = self.handshake.clock(req.is_active());
        if req.is_active() {
            self.dat_r = self.read(req.addr);
            if commit && req.we {
                self.write(req.addr, req.data, req.width);
            }
        }
    }

    fn reset(&mut self) {
        self.handshake.reset();
        self.dat_r = 0;
    }

    fn as_ram(&self) -> Option<&Ram> {
        Some(self)
    }

    fn as_ram_mut(&mut self) -> Option<&mut Ram> {
        Some(self)
    }
}
