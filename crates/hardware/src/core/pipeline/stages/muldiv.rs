//! Multiply/Divide State.
//!
//! Waits for the MDU's one-cycle `done` pulse. The cycle after `done` is
//! observed, the held result is captured, `ack` is pulsed to release the unit,
//! and the controller moves to `Writeback`.

use crate::core::Cpu;
use crate::core::pipeline::state::CoreState;
use crate::core::units::mdu::MduOutputs;

/// Executes one cycle of the multiply/divide state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `mdu` - Registered MDU outputs.
pub fn muldiv_stage(cpu: &mut Cpu, mdu: &MduOutputs) {
    if !cpu.latch.mdu_done_seen {
        cpu.latch.mdu_done_seen = mdu.done;
        return;
    }

    let op = cpu.latch.ctrl.muldiv;
    cpu.latch.mdu_result = mdu.result.map_or(0, |r| op.select(r));
    cpu.latch.mdu_done_seen = false;
    cpu.mdu_ctl.ack = true;
    cpu.state = CoreState::Writeback;
}
