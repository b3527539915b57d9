//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) distinguishes R-type operations that share a
//! `funct3` (ADD vs SUB, SRL vs SRA). For immediate shifts the same field holds
//! the upper bits of the shift-amount immediate.

/// Default operation (ADD, SRL, SLLI, SRLI, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB).
pub const SUB: u32 = 0b0100000;
/// Alternate operation (SRA, SRAI).
pub const SRA: u32 = 0b0100000;
