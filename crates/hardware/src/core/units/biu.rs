//! Bus Interface Unit (BIU).
//!
//! The master side of the core's two bus channels. It provides:
//! 1. **Request registers:** One [`BusMaster`] per channel holds the registered
//!    request; at most one request is outstanding at a time.
//! 2. **Store lanes:** Byte and halfword store data is replicated across the
//!    word and qualified with a byte-enable mask.
//! 3. **Load extraction:** The addressed lanes of a returned word are shifted
//!    down and sign- or zero-extended.

use crate::common::constants::{SEL_ALL, WORD_OFFSET_MASK};
use crate::core::pipeline::signals::MemWidth;
use crate::soc::bus::BusRequest;

/// Registered request of one bus channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusMaster {
    request: BusRequest,
}

impl BusMaster {
    /// The request signals as the peer sees them.
    pub const fn request(&self) -> BusRequest {
        self.request
    }

    /// Returns true while a request is outstanding.
    pub const fn is_active(&self) -> bool {
        self.request.active()
    }

    /// Starts driving `req`. Ignored while another request is outstanding.
    pub const fn issue(&mut self, req: BusRequest) {
        if !self.request.active() {
            self.request = req;
        }
    }

    /// Drops `cyc`/`stb`, ending the current request.
    pub fn release(&mut self) {
        self.request = BusRequest::default();
    }
}

/// Places store data on the byte lanes addressed by `addr`.
///
/// # Returns
///
/// `(dat, sel)`: the lane-replicated write data and its byte-enable mask.
///
/// ```
/// use rv32sim_core::core::pipeline::signals::MemWidth;
/// use rv32sim_core::core::units::biu::store_lanes;
///
/// assert_eq!(store_lanes(MemWidth::Byte, 0x1003, 0xAB), (0xABAB_ABAB, 0b1000));
/// assert_eq!(store_lanes(MemWidth::Half, 0x1002, 0x1234), (0x1234_1234, 0b1100));
/// ```
pub const fn store_lanes(width: MemWidth, addr: u32, value: u32) -> (u32, u8) {
    let lane = addr & WORD_OFFSET_MASK;
    match width {
        MemWidth::Byte => {
            let b = value & 0xFF;
            (b * 0x0101_0101, 1 << lane)
        }
        MemWidth::Half => {
            let h = value & 0xFFFF;
            (h | (h << 16), 0b11 << (lane & 0b10))
        }
        MemWidth::Word | MemWidth::Nop => (value, SEL_ALL),
    }
}

/// Extracts and extends the loaded value from the returned bus word.
pub const fn extract_load(width: MemWidth, signed: bool, addr: u32, word: u32) -> u32 {
    let shifted = word >> ((addr & WORD_OFFSET_MASK) * 8);
    match (width, signed) {
        (MemWidth::Byte, true) => shifted as u8 as i8 as i32 as u32,
        (MemWidth::Byte, false) => shifted & 0xFF,
        (MemWidth::Half, true) => shifted as u16 as i16 as i32 as u32,
        (MemWidth::Half, false) => shifted & 0xFFFF,
        (MemWidth::Word | MemWidth::Nop, _) => word,
    }
}
