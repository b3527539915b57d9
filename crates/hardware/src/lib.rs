//! RV32IM core model library.
//!
//! This crate implements a cycle-accurate model of a multi-cycle RV32IM
//! microcontroller core and its bus:
//! 1. **Core:** Controller FSM (fetch, decode, execute, mem/muldiv, writeback, trap),
//!    register file, and machine-mode CSRs.
//! 2. **Units:** ALU, multi-cycle multiply/divide unit, bus interface, exception detector.
//! 3. **ISA:** Decoding and disassembly of RV32I, RV32M and the privileged instructions.
//! 4. **SoC:** Two-channel interconnect, ROM/RAM, the peripheral window, `tohost` monitor.
//! 5. **Simulation:** Loader, configuration, two-phase clocking, and statistics.

/// Common types and constants (traps, host errors, widths).
pub mod common;
/// Simulator configuration (defaults and JSON-loadable structures).
pub mod config;
/// CPU core (controller, architectural state, functional units).
pub mod core;
/// Instruction set (decode, instruction fields, ABI names, disassembly).
pub mod isa;
/// Firmware loader and the simulator driver.
pub mod sim;
/// System-on-chip (builder, bus signals, devices, interconnect, memory).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds architectural state, the controller and the MDU.
pub use crate::core::Cpu;
/// Core plus system, clocked together.
pub use crate::sim::{RunOutcome, Simulator};
/// Top-level system (interconnect, memories, devices); construct with `System::new`.
pub use crate::soc::System;
