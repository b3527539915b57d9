//! Core processor implementation.
//!
//! This module contains the RV32IM core: its architectural state, the
//! controller that sequences instructions through their states, and the
//! functional units the controller drives.

/// Architecture-specific components (CSRs, register file, traps).
pub mod arch;

/// CPU core implementation and per-cycle execution.
pub mod cpu;

/// Controller pipeline (state, latch, signals, per-state behavior).
pub mod pipeline;

/// Functional units (ALU, MDU, bus interface, exception detector).
pub mod units;

pub use self::cpu::Cpu;
pub use self::cpu::execution::CoreInputs;
