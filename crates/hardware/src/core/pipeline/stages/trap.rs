//! Trap State.
//!
//! Takes the trap recorded by `Fetch`, `Execute` or `Mem`: the CSR unit
//! records `mepc`/`mcause`/`mtval` and stacks `MIE`, and PC moves to the
//! computed vector.

use crate::core::Cpu;
use crate::core::pipeline::state::CoreState;

/// Executes the trap state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn trap_stage(cpu: &mut Cpu) {
    if let Some(pending) = cpu.pending_trap.take() {
        if pending.trap.is_interrupt() {
            cpu.stats.interrupts += 1;
        } else {
            cpu.stats.exceptions += 1;
        }
        cpu.pc = cpu.csrs.enter_trap(&pending.trap, pending.epc);
    }
    cpu.state = CoreState::Fetch;
}
