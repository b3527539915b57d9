//! Global Model Constants.
//!
//! This module defines constants used across the core and SoC model. It includes:
//! 1. **Word Geometry:** Register width, word size, and byte-lane masks.
//! 2. **Instruction Constants:** Instruction size and the canonical NOP encoding.
//! 3. **Unit Constants:** Fixed iteration counts of the multi-cycle units.

/// Register and bus data width in bits.
pub const XLEN: u32 = 32;

/// Number of architectural general-purpose registers.
pub const NUM_GPRS: usize = 32;

/// Size of a bus word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Mask selecting the byte offset within a word.
pub const WORD_OFFSET_MASK: u32 = WORD_BYTES - 1;

/// Byte-enable mask with all four lanes active.
pub const SEL_ALL: u8 = 0b1111;

/// Size of a (non-compressed) instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical NOP encoding (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Number of iterations the multiply/divide unit runs for every operation.
pub const MDU_ITERATIONS: u32 = 32;

/// `tohost` value reported by a passing test program.
pub const TOHOST_PASS: u32 = 1;
