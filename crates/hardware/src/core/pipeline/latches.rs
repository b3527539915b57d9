//! Instruction latch.
//!
//! A multi-cycle core has a single instruction in flight. Everything the
//! states hand to each other is kept in one latch:
//! 1. **Fetch:** PC, the captured instruction word, and whether the fetch faulted.
//! 2. **Decode:** Decoded fields, control signals, and source register values.
//! 3. **Execute:** ALU result, effective address, next PC, and the CSR read value.
//! 4. **Mem/MulDiv:** The returned bus word or the selected MDU result.

use crate::common::Trap;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::Decoded;

/// State carried for the instruction in flight.
///
/// The instruction word is captured once per fetch and held stable until the
/// next fetch begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionLatch {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// The fetch completed with `err`.
    pub fetch_fault: bool,
    /// Decoded instruction fields.
    pub decoded: Decoded,
    /// Control signals generated by decode.
    pub ctrl: ControlSignals,
    /// Value read from `rs1`.
    pub rv1: u32,
    /// Value read from `rs2`.
    pub rv2: u32,
    /// ALU result (also the effective address of loads and stores).
    pub alu_result: u32,
    /// PC committed at write-back.
    pub next_pc: u32,
    /// Old CSR value read by a CSR instruction.
    pub csr_rdata: u32,
    /// Raw word returned by a load.
    pub load_word: u32,
    /// Result selected from the MDU.
    pub mdu_result: u32,
    /// MDU `done` has been observed; the result is captured next cycle.
    pub mdu_done_seen: bool,
}

/// A trap recorded for the `Trap` state to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTrap {
    /// Exception or interrupt.
    pub trap: Trap,
    /// Value for `mepc`.
    pub epc: u32,
}
