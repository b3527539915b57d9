//! RISC-V architectural state.
//!
//! This module contains the programmer-visible state of the core:
//! 1. **CSRs:** Machine-mode Control and Status Register definitions and access logic.
//! 2. **GPRs:** General-Purpose Register file implementation.
//! 3. **Traps:** Trap entry, trap return, vectoring, and interrupt arbitration.

/// Control and Status Register (CSR) definitions and access logic.
pub mod csr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Trap entry/return and interrupt arbitration.
pub mod trap;
