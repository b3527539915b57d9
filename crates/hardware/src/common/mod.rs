//! Common types and constants shared by every block of the model.
//!
//! This module provides:
//! 1. **Constants:** Word geometry, instruction size, and fixed iteration counts.
//! 2. **Error Handling:** Architectural trap values and host-side simulator errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Trap definitions and host-side error types.
pub mod error;

pub use error::{SimError, Trap};
