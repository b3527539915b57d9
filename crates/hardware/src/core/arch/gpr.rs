//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for RV32.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides a formatted dump of the complete register state.

use std::fmt;

use crate::common::constants::NUM_GPRS;
use crate::isa::abi::reg_name;

/// General-Purpose Register file.
///
/// Register `x0` is never stored to; reads of it always return zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_GPRS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx & (NUM_GPRS - 1)] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx & (NUM_GPRS - 1)] = val;
        }
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub fn snapshot(&self) -> [u32; NUM_GPRS] {
        let mut out = self.regs;
        out[0] = 0;
        out
    }
}

impl fmt::Display for Gpr {
    /// Formats the register file four registers per line with ABI names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..NUM_GPRS).step_by(4) {
            for idx in row..row + 4 {
                write!(f, "x{idx:<2} {:>4}={:#010x}  ", reg_name(idx), self.read(idx))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
