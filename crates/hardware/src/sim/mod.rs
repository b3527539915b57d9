//! Simulation driver and program loading.
//!
//! Provides the firmware loader and the [`Simulator`] that clocks the core
//! and its system together.

/// Firmware image parsing (raw binary, word hex, ELF32).
pub mod loader;

/// Two-phase clocking of core and system, run control and outcomes.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
