//! System-on-Chip (SoC) Components.
//!
//! This module organizes everything the core reaches over its bus channels:
//! the channel signal types, the interconnect, memories, the peripheral stub,
//! and the builder that assembles them from configuration.

/// System builder and top-level `System` type.
pub mod builder;

/// Bus channel request/response signals.
pub mod bus;

/// Bus-attached devices (peripheral stub, `tohost` monitor).
pub mod devices;

/// Channel routing and response timing.
pub mod interconnect;

/// Word-array memory regions.
pub mod memory;

/// Device trait definitions for bus access.
pub mod traits;

pub use builder::System;
