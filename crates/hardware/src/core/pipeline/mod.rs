//! Core controller pipeline.
//!
//! The core is a multi-cycle machine: one instruction moves through a
//! sequence of controller states. This module contains:
//! 1. **Latches:** The instruction latch carrying state between controller states.
//! 2. **Signals:** Control signals generated during instruction decoding.
//! 3. **State:** The controller FSM state.
//! 4. **Stages:** Per-state behavior (fetch, decode, execute, muldiv, mem, writeback, trap).

/// Instruction latch and pending-trap record.
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Controller FSM state.
pub mod state;

/// Per-state implementations.
pub mod stages;
