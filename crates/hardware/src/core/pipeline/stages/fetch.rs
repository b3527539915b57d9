//! Instruction Fetch State.
//!
//! Drives a word read at PC on the instruction channel and waits for the
//! peer. An enabled, pending interrupt abandons the fetch before it completes
//! and enters `Trap` with `mepc` set to the PC that would have been fetched.
//! An `err` response is latched as an instruction access fault for the
//! exception check in `Execute`.

use crate::core::Cpu;
use crate::core::pipeline::latches::InstructionLatch;
use crate::core::pipeline::state::CoreState;
use crate::soc::bus::{BusRequest, BusResponse};

/// Executes one cycle of the fetch state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `resp` - Registered instruction-channel response.
pub fn fetch_stage(cpu: &mut Cpu, resp: BusResponse) {
    if let Some(irq) = cpu.csrs.pending_interrupt() {
        cpu.ibus.release();
        cpu.raise(irq, cpu.pc);
        return;
    }

    if !cpu.ibus.is_active() {
        cpu.latch = InstructionLatch { pc: cpu.pc, ..InstructionLatch::default() };
        cpu.ibus.issue(BusRequest::read(cpu.pc));
        return;
    }

    if resp.ack || resp.err {
        cpu.latch.inst = resp.dat;
        cpu.latch.fetch_fault = resp.err;
        cpu.ibus.release();
        cpu.state = CoreState::Decode;
    } else {
        cpu.stats.fetch_wait_cycles += 1;
    }
}
