//! Bus-attached devices other than plain memory.
//!
//! 1. **Peripheral stub:** A register-backed window honoring the bus contract.
//! 2. **tohost monitor:** Decodes the pass/fail report of test programs.

/// Register-backed peripheral window.
pub mod scratch;

/// `tohost` write snooping and pass/fail decoding.
pub mod tohost;

pub use scratch::ScratchPeripheral;
pub use tohost::{TohostMonitor, TohostStatus};

pub use crate::soc::traits::Device;
