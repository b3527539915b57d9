//! `tohost` completion monitor.
//!
//! Test programs report completion by storing to the `tohost` word:
//!
//! * `0` - ignored (programs clear the word before the real report).
//! * `1` - pass.
//! * anything else - failure; the failing test number is `value >> 1`.
//!
//! The word stays ordinary memory. The monitor snoops completed data-channel
//! writes to its address instead of claiming the address on the bus.

use tracing::info;

use crate::common::constants::{SEL_ALL, TOHOST_PASS};

/// Decoded `tohost` report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TohostStatus {
    /// The program passed.
    Pass,
    /// The program failed with the given test number.
    Fail(u32),
}

/// Snoops writes to the `tohost` address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TohostMonitor {
    addr: u32,
    status: Option<TohostStatus>,
}

impl TohostMonitor {
    /// Creates a monitor for the word at `addr`.
    pub const fn new(addr: u32) -> Self {
        Self { addr, status: None }
    }

    /// Address being monitored.
    pub const fn addr(&self) -> u32 {
        self.addr
    }

    /// Report received so far, if any.
    pub const fn status(&self) -> Option<TohostStatus> {
        self.status
    }

    /// Observes a completed write.
    ///
    /// Only full-word stores to the monitored address count as a report.
    pub fn observe(&mut self, adr: u32, dat: u32, sel: u8) {
        if adr != self.addr || sel != SEL_ALL || dat == 0 || self.status.is_some() {
            return;
        }
        let status = if dat == TOHOST_PASS {
            TohostStatus::Pass
        } else {
            TohostStatus::Fail(dat >> 1)
        };
        info!("tohost write {dat:#x}: {status:?}");
        self.status = Some(status);
    }
}
