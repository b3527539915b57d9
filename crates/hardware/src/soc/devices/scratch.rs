//! Peripheral window stub.
//!
//! Peripheral internals (UART, SPI, GPIO, timers, ADC, PWM, protection) are
//! outside the model. The window is backed by plain read/write registers so
//! firmware that touches it sees the bus contract: address and byte-enable
//! decode with an acknowledged response.

use crate::common::constants::WORD_BYTES;
use crate::soc::bus::byte_lane_mask;
use crate::soc::traits::Device;

/// Register-backed stand-in for the peripheral block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScratchPeripheral {
    base: u32,
    regs: Vec<u32>,
}

impl ScratchPeripheral {
    /// Creates a peripheral window of `size` bytes at `base` with all registers zero.
    pub fn new(base: u32, size: u32) -> Self {
        Self { base, regs: vec![0; (size / WORD_BYTES) as usize] }
    }

    /// Returns the register at byte offset `offset`.
    pub fn register(&self, offset: u32) -> Option<u32> {
        self.regs.get((offset / WORD_BYTES) as usize).copied()
    }
}

impl Device for ScratchPeripheral {
    fn name(&self) -> &'static str {
        "PERIPH"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base, (self.regs.len() as u32) * WORD_BYTES)
    }

    fn read_word(&mut self, offset: u32) -> u32 {
        self.register(offset).unwrap_or(0)
    }

    fn write_word(&mut self, offset: u32, data: u32, sel: u8) {
        let mask = byte_lane_mask(sel);
        if let Some(reg) = self.regs.get_mut((offset / WORD_BYTES) as usize) {
            *reg = (*reg & !mask) | (data & mask);
        }
    }
}
