//! Execution units and functional components.
//!
//! This module contains the datapath blocks the core controller drives: the
//! combinational ALU and exception detector, the multi-cycle multiply/divide
//! unit, and the bus interface unit.

/// Arithmetic Logic Unit for integer operations and branch conditions.
pub mod alu;

/// Bus interface unit (channel request registers, store lanes, load extraction).
pub mod biu;

/// Priority-ordered exception detection.
pub mod exception;

/// Multi-cycle Multiply/Divide Unit.
pub mod mdu;
