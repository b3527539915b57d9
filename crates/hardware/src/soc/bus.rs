//! Bus channel signals.
//!
//! The core talks to memory and peripherals over two independent channels
//! (instruction fetch and data access) that follow a Wishbone-style classic
//! handshake:
//! 1. **Request:** The master holds `cyc` and `stb` high together with address,
//!    write-enable, write data, and a 4-bit byte-enable for the whole request.
//! 2. **Response:** The peer answers with `ack` (data valid) or `err` (bus fault).
//!    A request completes on the cycle the master observes either.
//!
//! Both structures are *registered* values: a block reads what its peer
//! committed at the end of the previous tick.

use crate::common::constants::SEL_ALL;

/// Bus channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Instruction-fetch channel (read-only).
    Instruction,
    /// Data channel (loads and stores).
    Data,
}

/// Master-to-peer request signals of one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// Bus cycle in progress.
    pub cyc: bool,
    /// Strobe: the request signals are valid.
    pub stb: bool,
    /// Write enable.
    pub we: bool,
    /// Byte address.
    pub adr: u32,
    /// Write data (lane-replicated for sub-word stores).
    pub dat: u32,
    /// Byte-enable mask, bit `n` enables byte lane `n`.
    pub sel: u8,
}

impl BusRequest {
    /// A word read at `adr`.
    pub const fn read(adr: u32) -> Self {
        Self { cyc: true, stb: true, we: false, adr, dat: 0, sel: SEL_ALL }
    }

    /// A write of `dat` at `adr` with byte-enable `sel`.
    pub const fn write(adr: u32, dat: u32, sel: u8) -> Self {
        Self { cyc: true, stb: true, we: true, adr, dat, sel }
    }

    /// Returns true while a request is being presented.
    pub const fn active(&self) -> bool {
        self.cyc && self.stb
    }
}

/// Peer-to-master response signals of one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Request completed successfully.
    pub ack: bool,
    /// Request failed (unmapped address or illegal access).
    pub err: bool,
    /// Read data, valid with `ack` on reads.
    pub dat: u32,
}

impl BusResponse {
    /// Successful completion carrying `dat`.
    pub const fn ack(dat: u32) -> Self {
        Self { ack: true, err: false, dat }
    }

    /// Bus error.
    pub const fn err() -> Self {
        Self { ack: false, err: true, dat: 0 }
    }
}

/// Expands a 4-bit byte-enable into a 32-bit data mask.
///
/// ```
/// use rv32sim_core::soc::bus::byte_lane_mask;
/// assert_eq!(byte_lane_mask(0b0110), 0x00FF_FF00);
/// ```
pub const fn byte_lane_mask(sel: u8) -> u32 {
    let mut mask = 0;
    let mut lane = 0;
    while lane < 4 {
        if sel & (1 << lane) != 0 {
            mask |= 0xFF << (lane * 8);
        }
        lane += 1;
    }
    mask
}
