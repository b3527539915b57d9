//! On-chip memory.
//!
//! A single indexed word array stands in for the banked SRAM macros of the
//! physical design: bank selection becomes plain indexing. It provides:
//! 1. **Storage:** `size / 4` little-endian words mapped at a base address.
//! 2. **Access:** Byte-enable merged writes through the [`Device`] trait.
//! 3. **Loading:** Byte-granular image loading with word padding.

use crate::common::constants::WORD_BYTES;
use crate::soc::bus::byte_lane_mask;
use crate::soc::traits::Device;

/// Word-addressed memory region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    name: &'static str,
    base: u32,
    words: Vec<u32>,
    read_only: bool,
}

impl Memory {
    /// Creates a memory region filled with `fill`.
    ///
    /// # Arguments
    ///
    /// * `name` - Device name used in logs.
    /// * `base` - Base byte address.
    /// * `size` - Size in bytes (rounded down to whole words).
    /// * `fill` - Initial value of every word.
    /// * `read_only` - Reject data-channel writes.
    pub fn new(name: &'static str, base: u32, size: u32, fill: u32, read_only: bool) -> Self {
        Self {
            name,
            base,
            words: vec![fill; (size / WORD_BYTES) as usize],
            read_only,
        }
    }

    /// Size of the region in bytes.
    pub const fn size(&self) -> u32 {
        (self.words.len() as u32) * WORD_BYTES
    }

    /// Returns the word at word index `idx`, or `None` past the end.
    pub fn word(&self, idx: usize) -> Option<u32> {
        self.words.get(idx).copied()
    }

    /// Returns all words of the region.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl Device for Memory {
    fn name(&self) -> &'static str {
        self.name
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base, self.size())
    }

    fn read_word(&mut self, offset: u32) -> u32 {
        self.word((offset / WORD_BYTES) as usize).unwrap_or(0)
    }

    fn write_word(&mut self, offset: u32, data: u32, sel: u8) {
        let mask = byte_lane_mask(sel);
        if let Some(word) = self.words.get_mut((offset / WORD_BYTES) as usize) {
            *word = (*word & !mask) | (data & mask);
        }
    }

    fn read_only(&self) -> bool {
        self.read_only
    }

    fn load(&mut self, offset: u32, data: &[u8]) -> bool {
        let end = u64::from(offset) + data.len() as u64;
        if end > u64::from(self.size()) {
            return false;
        }
        for (i, byte) in data.iter().enumerate() {
            let addr = offset as usize + i;
            let lane = (addr % WORD_BYTES as usize) as u32;
            let word = &mut self.words[addr / WORD_BYTES as usize];
            *word = (*word & !(0xFF << (lane * 8))) | (u32::from(*byte) << (lane * 8));
        }
        true
    }
}
